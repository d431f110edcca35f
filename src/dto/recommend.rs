use serde::Serialize;
use utoipa::ToSchema;

use crate::dao::models::{MovieEntity, SliderValues};

/// Catalog movie shaped for the recommendation deck.
#[derive(Debug, Serialize, ToSchema)]
pub struct MovieSummary {
    /// Catalog identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Plot summary.
    pub overview: String,
    /// Release date pinned to January 1st of the release year.
    pub release_date: String,
    /// Aggregate rating on a 0-10 scale.
    pub vote_average: f32,
    /// Poster path relative to the image CDN, if any.
    pub poster_path: Option<String>,
    /// Runtime in minutes, zero when unknown.
    pub runtime: u32,
    /// ISO 639-1 language code.
    pub original_language: String,
    /// ISO 3166-1 country code.
    pub origin_country: String,
    /// Top-billed cast members.
    pub cast: Vec<String>,
}

impl From<MovieEntity> for MovieSummary {
    fn from(movie: MovieEntity) -> Self {
        let overview = if movie.overview.is_empty() {
            // Synthesize a one-liner for catalog rows without a summary.
            format!(
                "{} - {}. {} tone.",
                movie.genre, movie.story_type, movie.tone
            )
        } else {
            movie.overview
        };

        Self {
            id: movie.id,
            title: movie.title,
            overview,
            release_date: format!("{}-01-01", movie.year),
            vote_average: movie.rating,
            poster_path: movie.poster_path,
            runtime: movie.runtime,
            original_language: movie.original_language,
            origin_country: movie.origin_country,
            cast: movie.cast,
        }
    }
}

/// Result of one recommendation round.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationsResponse {
    /// Recommended movies, shuffled, at most twenty.
    pub results: Vec<MovieSummary>,
    /// Human readable description of the group's combined taste.
    pub profile: String,
    /// Three playful constraints for the night.
    pub modifiers: Vec<String>,
    /// The averaged slider vector the filter was derived from.
    pub avg_sliders: SliderValues,
}
