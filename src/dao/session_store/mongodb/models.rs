use mongodb::bson::{Bson, DateTime, Document, doc};
use serde::{Deserialize, Serialize};

use crate::dao::models::{
    CatalogFilter, CatalogPredicate, HistoryEntryEntity, ParticipantEntity, SessionEntity,
    ShortlistEntryEntity, SliderValues,
};

/// Session document; timestamps stored as BSON datetimes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDocument {
    #[serde(rename = "_id")]
    id: i64,
    code: String,
    is_public: bool,
    created_at: DateTime,
}

impl From<SessionEntity> for SessionDocument {
    fn from(value: SessionEntity) -> Self {
        Self {
            id: value.id,
            code: value.code,
            is_public: value.is_public,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl From<SessionDocument> for SessionEntity {
    fn from(value: SessionDocument) -> Self {
        Self {
            id: value.id,
            code: value.code,
            is_public: value.is_public,
            created_at: value.created_at.to_system_time(),
        }
    }
}

/// Participant document keyed by the participant id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDocument {
    #[serde(rename = "_id")]
    id: i64,
    session_id: i64,
    nickname: String,
    sliders: SliderValues,
    created_at: DateTime,
}

impl From<ParticipantEntity> for ParticipantDocument {
    fn from(value: ParticipantEntity) -> Self {
        Self {
            id: value.id,
            session_id: value.session_id,
            nickname: value.nickname,
            sliders: value.sliders,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl From<ParticipantDocument> for ParticipantEntity {
    fn from(value: ParticipantDocument) -> Self {
        Self {
            id: value.id,
            session_id: value.session_id,
            nickname: value.nickname,
            sliders: value.sliders,
            created_at: value.created_at.to_system_time(),
        }
    }
}

/// Shared list entry document; uniqueness on (session_id, movie_id) is
/// enforced by an index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistDocument {
    session_id: i64,
    movie_id: i64,
    movie_data: serde_json::Value,
    added_by: i64,
    created_at: DateTime,
}

impl From<ShortlistEntryEntity> for ShortlistDocument {
    fn from(value: ShortlistEntryEntity) -> Self {
        Self {
            session_id: value.session_id,
            movie_id: value.movie_id,
            movie_data: value.movie_data,
            added_by: value.added_by,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl From<ShortlistDocument> for ShortlistEntryEntity {
    fn from(value: ShortlistDocument) -> Self {
        Self {
            session_id: value.session_id,
            movie_id: value.movie_id,
            movie_data: value.movie_data,
            added_by: value.added_by,
            created_at: value.created_at.to_system_time(),
        }
    }
}

/// Watch history document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryDocument {
    session_id: i64,
    movie_id: i64,
    movie_title: String,
    movie_data: serde_json::Value,
    rating: Option<f32>,
    watched_on: DateTime,
}

impl From<HistoryEntryEntity> for HistoryDocument {
    fn from(value: HistoryEntryEntity) -> Self {
        Self {
            session_id: value.session_id,
            movie_id: value.movie_id,
            movie_title: value.movie_title,
            movie_data: value.movie_data,
            rating: value.rating,
            watched_on: DateTime::from_system_time(value.watched_on),
        }
    }
}

impl From<HistoryDocument> for HistoryEntryEntity {
    fn from(value: HistoryDocument) -> Self {
        Self {
            session_id: value.session_id,
            movie_id: value.movie_id,
            movie_title: value.movie_title,
            movie_data: value.movie_data,
            rating: value.rating,
            watched_on: value.watched_on.to_system_time(),
        }
    }
}

/// Translate a catalog filter into a MongoDB query document.
pub fn filter_to_query(filter: &CatalogFilter) -> Document {
    if filter.clauses.is_empty() {
        return doc! {};
    }

    let clauses: Vec<Bson> = filter
        .clauses
        .iter()
        .map(|clause| {
            let alternatives: Vec<Bson> = clause
                .any_of
                .iter()
                .map(|predicate| Bson::Document(predicate_to_query(predicate)))
                .collect();
            Bson::Document(doc! { "$or": alternatives })
        })
        .collect();

    doc! { "$and": clauses }
}

fn predicate_to_query(predicate: &CatalogPredicate) -> Document {
    match predicate {
        CatalogPredicate::GenreIn(labels) => doc! { "genre": { "$in": labels.clone() } },
        CatalogPredicate::GenreNotIn(labels) => doc! { "genre": { "$nin": labels.clone() } },
        CatalogPredicate::SubGenreIn(labels) => doc! { "sub_genre": { "$in": labels.clone() } },
        CatalogPredicate::ToneIn(labels) => doc! { "tone": { "$in": labels.clone() } },
        CatalogPredicate::ToneNotIn(labels) => doc! { "tone": { "$nin": labels.clone() } },
        CatalogPredicate::StoryTypeIn(labels) => doc! { "story_type": { "$in": labels.clone() } },
        CatalogPredicate::StoryTypeNotIn(labels) => {
            doc! { "story_type": { "$nin": labels.clone() } }
        }
        CatalogPredicate::YearBefore(year) => doc! { "year": { "$lt": *year } },
        CatalogPredicate::YearAtLeast(year) => doc! { "year": { "$gte": *year } },
        CatalogPredicate::RatingAbove(rating) => doc! { "rating": { "$gt": *rating } },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::CatalogClause;

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(filter_to_query(&CatalogFilter::default()), doc! {});
    }

    #[test]
    fn clauses_become_and_of_ors() {
        let filter = CatalogFilter {
            clauses: vec![
                CatalogClause::any(vec![
                    CatalogPredicate::GenreIn(vec!["Horror", "Thriller"]),
                    CatalogPredicate::ToneIn(vec!["Dark"]),
                ]),
                CatalogClause::of(CatalogPredicate::YearAtLeast(2000)),
            ],
        };

        let query = filter_to_query(&filter);
        let clauses = query.get_array("$and").unwrap();
        assert_eq!(clauses.len(), 2);
    }
}
