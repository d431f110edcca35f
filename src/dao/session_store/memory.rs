//! In-memory [`SessionStore`] backend.
//!
//! Used by the test suite and by local runs without a database. Everything is
//! lost on restart, which is acceptable for both.

use std::sync::Arc;

use dashmap::DashMap;
use futures::future::BoxFuture;

use crate::dao::{
    models::{
        CatalogFilter, HistoryEntryEntity, MovieEntity, ParticipantEntity, SessionEntity,
        ShortlistEntryEntity, VoteEntity,
    },
    session_store::SessionStore,
    storage::StorageResult,
};

/// [`SessionStore`] implementation backed by concurrent maps.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    sessions: DashMap<i64, SessionEntity>,
    // Participants, entries, votes, and history are stored per session so a
    // session read never scans unrelated sessions.
    participants: DashMap<i64, Vec<ParticipantEntity>>,
    shortlist: DashMap<i64, Vec<ShortlistEntryEntity>>,
    votes: DashMap<i64, Vec<VoteEntity>>,
    history: DashMap<i64, Vec<HistoryEntryEntity>>,
    movies: DashMap<i64, MovieEntity>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the movie catalog. Intended for tests and local seeding;
    /// catalog ingestion proper is owned by an external collaborator.
    pub fn seed_movies(&self, movies: impl IntoIterator<Item = MovieEntity>) {
        for movie in movies {
            self.inner.movies.insert(movie.id, movie);
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn create_session(&self, session: SessionEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.inner.sessions.insert(session.id, session);
            Ok(())
        })
    }

    fn find_session_by_code(
        &self,
        code: String,
    ) -> BoxFuture<'static, StorageResult<Option<SessionEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let found = store
                .inner
                .sessions
                .iter()
                .find(|entry| entry.code == code)
                .map(|entry| entry.value().clone());
            Ok(found)
        })
    }

    fn find_session(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<SessionEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.sessions.get(&id).map(|entry| entry.value().clone())) })
    }

    fn set_session_visibility(
        &self,
        id: i64,
        is_public: bool,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            match store.inner.sessions.get_mut(&id) {
                Some(mut session) => {
                    session.is_public = is_public;
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    fn add_participant(
        &self,
        participant: ParticipantEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .inner
                .participants
                .entry(participant.session_id)
                .or_default()
                .push(participant);
            Ok(())
        })
    }

    fn list_participants(
        &self,
        session_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store
                .inner
                .participants
                .get(&session_id)
                .map(|list| list.value().clone())
                .unwrap_or_default())
        })
    }

    fn add_shortlist_entry(
        &self,
        entry: ShortlistEntryEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut list = store.inner.shortlist.entry(entry.session_id).or_default();
            if !list.iter().any(|existing| existing.movie_id == entry.movie_id) {
                list.push(entry);
            }
            Ok(())
        })
    }

    fn list_shortlist(
        &self,
        session_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<ShortlistEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store
                .inner
                .shortlist
                .get(&session_id)
                .map(|list| list.value().clone())
                .unwrap_or_default())
        })
    }

    fn remove_shortlist_entry(
        &self,
        session_id: i64,
        movie_id: i64,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            let Some(mut list) = store.inner.shortlist.get_mut(&session_id) else {
                return Ok(false);
            };
            let before = list.len();
            list.retain(|entry| entry.movie_id != movie_id);
            Ok(list.len() < before)
        })
    }

    fn upsert_vote(&self, vote: VoteEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut votes = store.inner.votes.entry(vote.session_id).or_default();
            match votes.iter_mut().find(|existing| {
                existing.movie_id == vote.movie_id
                    && existing.participant_id == vote.participant_id
            }) {
                Some(existing) => existing.value = vote.value,
                None => votes.push(vote),
            }
            Ok(())
        })
    }

    fn list_votes(&self, session_id: i64) -> BoxFuture<'static, StorageResult<Vec<VoteEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store
                .inner
                .votes
                .get(&session_id)
                .map(|votes| votes.value().clone())
                .unwrap_or_default())
        })
    }

    fn list_votes_for_movie(
        &self,
        session_id: i64,
        movie_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<VoteEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store
                .inner
                .votes
                .get(&session_id)
                .map(|votes| {
                    votes
                        .iter()
                        .filter(|vote| vote.movie_id == movie_id)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default())
        })
    }

    fn delete_votes_for_movie(
        &self,
        session_id: i64,
        movie_id: i64,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            if let Some(mut votes) = store.inner.votes.get_mut(&session_id) {
                votes.retain(|vote| vote.movie_id != movie_id);
            }
            Ok(())
        })
    }

    fn query_movies(
        &self,
        filter: CatalogFilter,
    ) -> BoxFuture<'static, StorageResult<Vec<MovieEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store
                .inner
                .movies
                .iter()
                .filter(|movie| filter.matches(movie.value()))
                .map(|movie| movie.value().clone())
                .collect())
        })
    }

    fn top_rated_movies(
        &self,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<MovieEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let mut movies: Vec<MovieEntity> = store
                .inner
                .movies
                .iter()
                .map(|movie| movie.value().clone())
                .collect();
            movies.sort_by(|a, b| b.rating.total_cmp(&a.rating));
            movies.truncate(limit);
            Ok(movies)
        })
    }

    fn add_history_entry(
        &self,
        entry: HistoryEntryEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .inner
                .history
                .entry(entry.session_id)
                .or_default()
                .push(entry);
            Ok(())
        })
    }

    fn list_history(
        &self,
        session_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<HistoryEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let mut entries = store
                .inner
                .history
                .get(&session_id)
                .map(|entries| entries.value().clone())
                .unwrap_or_default();
            entries.sort_by(|a, b| b.watched_on.cmp(&a.watched_on));
            Ok(entries)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
