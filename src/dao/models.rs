use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use utoipa::ToSchema;

/// A movie-night session participants join with an opaque code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionEntity {
    /// Primary key of the session.
    pub id: i64,
    /// Six-character uppercase join code shared with participants.
    pub code: String,
    /// Whether the session is listed publicly or joinable by code only.
    pub is_public: bool,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
}

/// A participant of a session together with their taste preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantEntity {
    /// Primary key of the participant.
    pub id: i64,
    /// Session this participant belongs to.
    pub session_id: i64,
    /// Display name chosen when joining.
    pub nickname: String,
    /// Preference vector captured once at join time.
    pub sliders: SliderValues,
    /// Join timestamp.
    pub created_at: SystemTime,
}

/// Nine-axis taste preference vector. Each axis lives in `[0, 5]`;
/// 2.5 is the neutral midpoint and the default for omitted axes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct SliderValues {
    /// Brainy (0) vs easy-watching (5).
    #[serde(default = "neutral")]
    pub brainy_easy: f32,
    /// Emotional (0) vs lighthearted (5).
    #[serde(default = "neutral")]
    pub emotional_light: f32,
    /// Action-driven (0) vs dialogue-driven (5).
    #[serde(default = "neutral")]
    pub action_dialogue: f32,
    /// Realistic (0) vs weird (5).
    #[serde(default = "neutral")]
    pub realistic_weird: f32,
    /// Classic (0) vs modern (5).
    #[serde(default = "neutral")]
    pub classic_modern: f32,
    /// Safe (0) vs scary (5).
    #[serde(default = "neutral")]
    pub safe_scary: f32,
    /// Slow-burn (0) vs fast-paced (5).
    #[serde(default = "neutral")]
    pub slow_fast: f32,
    /// Indie (0) vs blockbuster (5).
    #[serde(default = "neutral")]
    pub indie_blockbuster: f32,
    /// Live-action (0) vs animated (5).
    #[serde(default = "neutral")]
    pub live_animated: f32,
}

/// The neutral midpoint of a slider axis.
pub fn neutral() -> f32 {
    2.5
}

impl Default for SliderValues {
    fn default() -> Self {
        Self {
            brainy_easy: neutral(),
            emotional_light: neutral(),
            action_dialogue: neutral(),
            realistic_weird: neutral(),
            classic_modern: neutral(),
            safe_scary: neutral(),
            slow_fast: neutral(),
            indie_blockbuster: neutral(),
            live_animated: neutral(),
        }
    }
}

impl SliderValues {
    /// View the vector as `(axis name, value)` pairs in declaration order.
    pub fn axes(&self) -> [(&'static str, f32); 9] {
        [
            ("brainy_easy", self.brainy_easy),
            ("emotional_light", self.emotional_light),
            ("action_dialogue", self.action_dialogue),
            ("realistic_weird", self.realistic_weird),
            ("classic_modern", self.classic_modern),
            ("safe_scary", self.safe_scary),
            ("slow_fast", self.slow_fast),
            ("indie_blockbuster", self.indie_blockbuster),
            ("live_animated", self.live_animated),
        ]
    }
}

/// A movie proposed to the shared list of a session.
///
/// The catalog payload is denormalized onto the entry so the shared list can
/// be rendered without a catalog round-trip per item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShortlistEntryEntity {
    /// Session the entry belongs to.
    pub session_id: i64,
    /// Catalog identifier of the proposed movie.
    pub movie_id: i64,
    /// Snapshot of the movie's catalog payload at add time.
    pub movie_data: serde_json::Value,
    /// Participant who proposed the movie.
    pub added_by: i64,
    /// When the entry was added.
    pub created_at: SystemTime,
}

/// A like or dislike cast by one participant on one shortlisted movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteEntity {
    /// Session the vote belongs to.
    pub session_id: i64,
    /// Movie the vote targets.
    pub movie_id: i64,
    /// Participant who cast the vote.
    pub participant_id: i64,
    /// The vote itself.
    pub value: VoteValue,
}

/// Direction of a vote. At most one vote exists per
/// (session, movie, participant); re-voting replaces the previous value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "i8", into = "i8")]
pub enum VoteValue {
    /// +1, counts toward `likes`.
    Like,
    /// -1, counts toward `dislikes` and the eviction threshold.
    Dislike,
}

impl TryFrom<i8> for VoteValue {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Like),
            -1 => Ok(VoteValue::Dislike),
            other => Err(format!("vote value must be 1 or -1, got {other}")),
        }
    }
}

impl From<VoteValue> for i8 {
    fn from(value: VoteValue) -> Self {
        match value {
            VoteValue::Like => 1,
            VoteValue::Dislike => -1,
        }
    }
}

/// Catalog record for a movie the recommendation filter can select.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieEntity {
    /// Primary key of the movie.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Release year.
    pub year: i32,
    /// Primary genre label.
    pub genre: String,
    /// Secondary genre label ("General" when absent).
    pub sub_genre: String,
    /// Narrative shape label (e.g. "Mind-bending", "Whodunit").
    pub story_type: String,
    /// Tone label (e.g. "Silly", "Suspenseful").
    pub tone: String,
    /// Aggregate rating on a 0-10 scale.
    pub rating: f32,
    /// Poster path relative to the image CDN, if any.
    pub poster_path: Option<String>,
    /// Plot summary.
    pub overview: String,
    /// Runtime in minutes, zero when unknown.
    pub runtime: u32,
    /// ISO 639-1 language code.
    pub original_language: String,
    /// ISO 3166-1 country code, "Unknown" when absent.
    pub origin_country: String,
    /// Up to five top-billed cast members.
    pub cast: Vec<String>,
}

/// Record of a movie the session actually watched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntryEntity {
    /// Session the record belongs to.
    pub session_id: i64,
    /// Catalog identifier of the watched movie.
    pub movie_id: i64,
    /// Title snapshot at watch time.
    pub movie_title: String,
    /// Catalog payload snapshot at watch time.
    pub movie_data: serde_json::Value,
    /// Group rating given after watching, if any.
    pub rating: Option<f32>,
    /// When the movie was watched.
    pub watched_on: SystemTime,
}

/// One AND-clause of a catalog filter: the movie must satisfy at least one
/// of the listed predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogClause {
    /// Alternatives, any of which satisfies the clause.
    pub any_of: Vec<CatalogPredicate>,
}

impl CatalogClause {
    /// Clause requiring a single predicate.
    pub fn of(predicate: CatalogPredicate) -> Self {
        Self {
            any_of: vec![predicate],
        }
    }

    /// Clause satisfied by any of the given predicates.
    pub fn any(any_of: Vec<CatalogPredicate>) -> Self {
        Self { any_of }
    }
}

/// A single testable condition on a catalog movie.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogPredicate {
    /// Genre is one of the listed labels.
    GenreIn(Vec<&'static str>),
    /// Genre is none of the listed labels.
    GenreNotIn(Vec<&'static str>),
    /// Sub-genre is one of the listed labels.
    SubGenreIn(Vec<&'static str>),
    /// Tone is one of the listed labels.
    ToneIn(Vec<&'static str>),
    /// Tone is none of the listed labels.
    ToneNotIn(Vec<&'static str>),
    /// Story type is one of the listed labels.
    StoryTypeIn(Vec<&'static str>),
    /// Story type is none of the listed labels.
    StoryTypeNotIn(Vec<&'static str>),
    /// Released strictly before the given year.
    YearBefore(i32),
    /// Released in or after the given year.
    YearAtLeast(i32),
    /// Rating strictly above the given value.
    RatingAbove(f32),
}

/// Conjunction of clauses produced by the recommendation filter.
/// An empty filter matches the whole catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Clauses that must all hold.
    pub clauses: Vec<CatalogClause>,
}

impl CatalogFilter {
    /// Evaluate the filter against a movie. Backends without a native query
    /// language (the in-memory store) call this directly; the MongoDB backend
    /// translates each predicate into its query syntax instead.
    pub fn matches(&self, movie: &MovieEntity) -> bool {
        self.clauses.iter().all(|clause| {
            clause
                .any_of
                .iter()
                .any(|predicate| predicate.matches(movie))
        })
    }
}

impl CatalogPredicate {
    fn matches(&self, movie: &MovieEntity) -> bool {
        match self {
            CatalogPredicate::GenreIn(labels) => labels.contains(&movie.genre.as_str()),
            CatalogPredicate::GenreNotIn(labels) => !labels.contains(&movie.genre.as_str()),
            CatalogPredicate::SubGenreIn(labels) => labels.contains(&movie.sub_genre.as_str()),
            CatalogPredicate::ToneIn(labels) => labels.contains(&movie.tone.as_str()),
            CatalogPredicate::ToneNotIn(labels) => !labels.contains(&movie.tone.as_str()),
            CatalogPredicate::StoryTypeIn(labels) => labels.contains(&movie.story_type.as_str()),
            CatalogPredicate::StoryTypeNotIn(labels) => {
                !labels.contains(&movie.story_type.as_str())
            }
            CatalogPredicate::YearBefore(year) => movie.year < *year,
            CatalogPredicate::YearAtLeast(year) => movie.year >= *year,
            CatalogPredicate::RatingAbove(rating) => movie.rating > *rating,
        }
    }
}
