//! Shared-list operations: idempotent adds, last-write-wins voting with
//! auto-eviction, the read-time aggregate, batch finalization, and the
//! capability-gated removal.

use std::collections::HashMap;
use std::time::SystemTime;

use tracing::info;

use crate::{
    dao::models::{ShortlistEntryEntity, VoteEntity, VoteValue},
    dto::{
        common::AckResponse,
        list::{AddEntryRequest, FinalizeResponse, SharedListItem, SharedListResponse, VoteRequest, VoteResponse},
    },
    error::ServiceError,
    state::SharedState,
};

/// A movie is evicted once this many participants' current vote is a dislike,
/// regardless of likes: one veto-pair kills it. Sized for groups of 2-4.
pub const DISLIKE_EVICTION_THRESHOLD: u32 = 2;

/// A movie counts as a match once this many participants like it.
pub const MATCH_THRESHOLD: u32 = 2;

/// Add a movie to the session's shared list. Re-adding an already listed
/// movie is a no-op reported as success.
pub async fn add_entry(
    state: &SharedState,
    session_id: i64,
    request: AddEntryRequest,
) -> Result<AckResponse, ServiceError> {
    let store = state.require_session_store().await?;

    if store.find_session(session_id).await?.is_none() {
        return Err(ServiceError::NotFound(format!(
            "session `{session_id}` not found"
        )));
    }

    store
        .add_shortlist_entry(ShortlistEntryEntity {
            session_id,
            movie_id: request.movie_id,
            movie_data: request.movie_data,
            added_by: request.added_by,
            created_at: SystemTime::now(),
        })
        .await?;

    Ok(AckResponse::ok())
}

/// Cast or change a vote, then re-check the eviction threshold.
///
/// The gate is held from the upsert through the eviction so no other vote on
/// the same session interleaves between the write and the recount; the
/// threshold check always runs on the counts this vote produced.
pub async fn cast_vote(
    state: &SharedState,
    session_id: i64,
    request: VoteRequest,
) -> Result<VoteResponse, ServiceError> {
    let value = VoteValue::try_from(request.value).map_err(ServiceError::InvalidInput)?;
    let store = state.require_session_store().await?;

    let _gate = state.vote_gate().lock().await;

    store
        .upsert_vote(VoteEntity {
            session_id,
            movie_id: request.movie_id,
            participant_id: request.participant_id,
            value,
        })
        .await?;

    let votes = store
        .list_votes_for_movie(session_id, request.movie_id)
        .await?;
    let dislikes = votes
        .iter()
        .filter(|vote| vote.value == VoteValue::Dislike)
        .count() as u32;

    if dislikes >= DISLIKE_EVICTION_THRESHOLD {
        store
            .remove_shortlist_entry(session_id, request.movie_id)
            .await?;
        store
            .delete_votes_for_movie(session_id, request.movie_id)
            .await?;

        info!(
            session_id,
            movie_id = request.movie_id,
            dislikes,
            "movie evicted from shared list"
        );

        return Ok(VoteResponse {
            success: true,
            removed: true,
        });
    }

    Ok(VoteResponse {
        success: true,
        removed: false,
    })
}

/// The shared list with per-entry vote aggregates, computed by grouping the
/// current vote set at read time. There are no maintained counters to drift.
pub async fn shared_list(
    state: &SharedState,
    session_id: i64,
) -> Result<SharedListResponse, ServiceError> {
    let store = state.require_session_store().await?;

    let entries = store.list_shortlist(session_id).await?;
    let votes = store.list_votes(session_id).await?;
    let tallies = tally_votes(&votes);

    let items = entries
        .into_iter()
        .filter_map(|entry| {
            let (likes, dislikes) = tallies.get(&entry.movie_id).copied().unwrap_or((0, 0));

            // The eviction invariant holds for readers even if a concurrent
            // cast_vote has counted the second dislike but not yet deleted.
            if dislikes >= DISLIKE_EVICTION_THRESHOLD {
                return None;
            }

            Some(SharedListItem {
                movie_id: entry.movie_id,
                movie_data: entry.movie_data,
                added_by: entry.added_by,
                likes,
                dislikes,
                is_match: likes >= MATCH_THRESHOLD,
                is_split_decision: likes > 0 && dislikes > 0,
            })
        })
        .collect();

    Ok(SharedListResponse { items })
}

/// Apply the eviction rule exhaustively to the current aggregate as an
/// explicit one-shot batch, distinct from the per-vote eviction.
pub async fn finalize(
    state: &SharedState,
    session_id: i64,
) -> Result<FinalizeResponse, ServiceError> {
    let store = state.require_session_store().await?;

    let _gate = state.vote_gate().lock().await;

    let entries = store.list_shortlist(session_id).await?;
    let votes = store.list_votes(session_id).await?;
    let tallies = tally_votes(&votes);

    let mut removed_movie_ids = Vec::new();
    for entry in entries {
        let (_, dislikes) = tallies.get(&entry.movie_id).copied().unwrap_or((0, 0));
        if dislikes < DISLIKE_EVICTION_THRESHOLD {
            continue;
        }

        store
            .remove_shortlist_entry(session_id, entry.movie_id)
            .await?;
        store
            .delete_votes_for_movie(session_id, entry.movie_id)
            .await?;
        removed_movie_ids.push(entry.movie_id);
    }

    if !removed_movie_ids.is_empty() {
        info!(
            session_id,
            removed = removed_movie_ids.len(),
            "finalize evicted over-threshold movies"
        );
    }

    Ok(FinalizeResponse { removed_movie_ids })
}

/// Unconditionally delete an entry and its votes, independent of vote counts.
/// Whether the caller earned this (a trivia win) is enforced outside the core.
pub async fn remove_entry(
    state: &SharedState,
    session_id: i64,
    movie_id: i64,
) -> Result<AckResponse, ServiceError> {
    let store = state.require_session_store().await?;

    let _gate = state.vote_gate().lock().await;

    let removed = store.remove_shortlist_entry(session_id, movie_id).await?;
    store.delete_votes_for_movie(session_id, movie_id).await?;

    if removed {
        info!(session_id, movie_id, "movie removed from shared list");
    }

    Ok(AckResponse::ok())
}

/// Group votes by movie into (likes, dislikes) pairs.
fn tally_votes(votes: &[VoteEntity]) -> HashMap<i64, (u32, u32)> {
    let mut tallies: HashMap<i64, (u32, u32)> = HashMap::new();
    for vote in votes {
        let entry = tallies.entry(vote.movie_id).or_default();
        match vote.value {
            VoteValue::Like => entry.0 += 1,
            VoteValue::Dislike => entry.1 += 1,
        }
    }
    tallies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(movie_id: i64, participant_id: i64, value: VoteValue) -> VoteEntity {
        VoteEntity {
            session_id: 1,
            movie_id,
            participant_id,
            value,
        }
    }

    #[test]
    fn tally_groups_by_movie() {
        let votes = [
            vote(10, 1, VoteValue::Like),
            vote(10, 2, VoteValue::Dislike),
            vote(11, 1, VoteValue::Like),
            vote(11, 2, VoteValue::Like),
        ];

        let tallies = tally_votes(&votes);
        assert_eq!(tallies.get(&10), Some(&(1, 1)));
        assert_eq!(tallies.get(&11), Some(&(2, 0)));
        assert_eq!(tallies.get(&12), None);
    }
}
