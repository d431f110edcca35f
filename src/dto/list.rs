use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::dto::validation::validate_vote_value;

/// Request adding a movie to the shared list.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddEntryRequest {
    /// Catalog identifier of the proposed movie.
    pub movie_id: i64,
    /// Catalog payload snapshot to denormalize onto the entry.
    #[schema(value_type = Object)]
    pub movie_data: serde_json::Value,
    /// Participant proposing the movie.
    pub added_by: i64,
}

/// One shared-list entry with its read-time vote aggregate.
#[derive(Debug, Serialize, ToSchema)]
pub struct SharedListItem {
    /// Catalog identifier of the movie.
    pub movie_id: i64,
    /// Catalog payload snapshot.
    #[schema(value_type = Object)]
    pub movie_data: serde_json::Value,
    /// Participant who proposed the movie.
    pub added_by: i64,
    /// Number of participants whose current vote is a like.
    pub likes: u32,
    /// Number of participants whose current vote is a dislike.
    pub dislikes: u32,
    /// Derived: at least two likes.
    pub is_match: bool,
    /// Derived: liked and disliked at once, below the eviction threshold.
    pub is_split_decision: bool,
}

/// The shared list of a session.
#[derive(Debug, Serialize, ToSchema)]
pub struct SharedListResponse {
    /// Entries still on the list, with aggregates.
    pub items: Vec<SharedListItem>,
}

/// Request casting or changing a vote.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VoteRequest {
    /// Movie being voted on.
    pub movie_id: i64,
    /// Participant casting the vote.
    pub participant_id: i64,
    /// +1 for like, -1 for dislike.
    pub value: i8,
}

impl Validate for VoteRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_vote_value(self.value) {
            errors.add("value", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Result of casting a vote.
#[derive(Debug, Serialize, ToSchema)]
pub struct VoteResponse {
    /// Always true; store failures surface as HTTP errors.
    pub success: bool,
    /// True when this vote pushed the movie over the eviction threshold and
    /// the entry was removed.
    pub removed: bool,
}

/// Result of an explicit batch eviction pass.
#[derive(Debug, Serialize, ToSchema)]
pub struct FinalizeResponse {
    /// Movies evicted during this pass.
    pub removed_movie_ids: Vec<i64>,
}
