use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{dao::models::HistoryEntryEntity, dto::format_system_time};

/// Request recording a watched movie.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddHistoryRequest {
    /// Catalog identifier of the watched movie.
    pub movie_id: i64,
    /// Title snapshot.
    pub movie_title: String,
    /// Catalog payload snapshot.
    #[schema(value_type = Object)]
    pub movie_data: serde_json::Value,
    /// Group rating on a 0-10 scale, if the group rated the night.
    #[serde(default)]
    pub rating: Option<f32>,
}

impl Validate for AddHistoryRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(rating) = self.rating
            && (!rating.is_finite() || !(0.0..=10.0).contains(&rating))
        {
            let mut err = validator::ValidationError::new("rating_range");
            err.message = Some("Rating must be between 0 and 10".into());
            errors.add("rating", err);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// One watch-history record.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryItem {
    /// Catalog identifier of the watched movie.
    pub movie_id: i64,
    /// Title snapshot.
    pub movie_title: String,
    /// Catalog payload snapshot.
    #[schema(value_type = Object)]
    pub movie_data: serde_json::Value,
    /// Group rating, if any.
    pub rating: Option<f32>,
    /// RFC3339 watch timestamp.
    pub watched_on: String,
}

impl From<HistoryEntryEntity> for HistoryItem {
    fn from(entry: HistoryEntryEntity) -> Self {
        Self {
            movie_id: entry.movie_id,
            movie_title: entry.movie_title,
            movie_data: entry.movie_data,
            rating: entry.rating,
            watched_on: format_system_time(entry.watched_on),
        }
    }
}

/// Watch history of a session.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    /// Records, newest first.
    pub items: Vec<HistoryItem>,
}
