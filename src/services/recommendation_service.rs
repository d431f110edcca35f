//! Recommendation round: average the group's sliders, translate the averages
//! into a catalog filter, and dress the result up with a night profile and
//! modifiers.
//!
//! The averaging, filter construction, and profile text are pure functions;
//! the store is only consulted for the catalog query itself.

use rand::seq::SliceRandom;

use crate::{
    dao::models::{
        CatalogClause, CatalogFilter, CatalogPredicate, ParticipantEntity, SliderValues,
    },
    dto::recommend::RecommendationsResponse,
    error::ServiceError,
    state::SharedState,
};

/// At most this many movies per recommendation round.
const RESULT_CAP: usize = 20;
/// Size of the top-rated fallback when the filter matches nothing.
const FALLBACK_COUNT: usize = 10;

/// An axis average below this pulls in the axis' low-end condition.
const LOW_THRESHOLD: f32 = 2.0;
/// An axis average above this pulls in the axis' high-end condition.
const HIGH_THRESHOLD: f32 = 3.0;
/// At most this many adjectives make it into the night profile.
const PROFILE_ADJECTIVES: usize = 3;

/// Compute one recommendation round for a session.
pub async fn recommendations(
    state: &SharedState,
    session_id: i64,
) -> Result<RecommendationsResponse, ServiceError> {
    let store = state.require_session_store().await?;

    let participants = store.list_participants(session_id).await?;
    if participants.is_empty() {
        return Err(ServiceError::InvalidInput(
            "session has no participants to recommend for".into(),
        ));
    }

    let avg = average_sliders(&participants);
    let filter = catalog_filter(&avg);

    let mut movies = store.query_movies(filter).await?;
    if movies.is_empty() {
        movies = store.top_rated_movies(FALLBACK_COUNT).await?;
    }

    movies.shuffle(&mut rand::rng());
    movies.truncate(RESULT_CAP);

    Ok(RecommendationsResponse {
        results: movies.into_iter().map(Into::into).collect(),
        profile: night_profile(&avg),
        modifiers: state.config().random_modifiers(),
        avg_sliders: avg,
    })
}

/// Average the participants' slider vectors axis by axis.
pub fn average_sliders(participants: &[ParticipantEntity]) -> SliderValues {
    let count = participants.len() as f32;
    let mut sums = [0.0f32; 9];
    for participant in participants {
        for (index, (_, value)) in participant.sliders.axes().iter().enumerate() {
            sums[index] += value;
        }
    }

    SliderValues {
        brainy_easy: sums[0] / count,
        emotional_light: sums[1] / count,
        action_dialogue: sums[2] / count,
        realistic_weird: sums[3] / count,
        classic_modern: sums[4] / count,
        safe_scary: sums[5] / count,
        slow_fast: sums[6] / count,
        indie_blockbuster: sums[7] / count,
        live_animated: sums[8] / count,
    }
}

/// Translate averaged sliders into a catalog filter: one or two AND-clauses
/// per decided axis, nothing for axes hovering around neutral.
pub fn catalog_filter(avg: &SliderValues) -> CatalogFilter {
    let mut clauses = Vec::new();

    if avg.brainy_easy < LOW_THRESHOLD {
        clauses.push(CatalogClause::any(vec![
            CatalogPredicate::GenreIn(vec!["Documentary", "Drama", "Sci-Fi"]),
            CatalogPredicate::StoryTypeIn(vec!["Mind-bending"]),
        ]));
    } else if avg.brainy_easy > HIGH_THRESHOLD {
        clauses.push(CatalogClause::any(vec![
            CatalogPredicate::GenreIn(vec!["Comedy", "Action", "Adventure"]),
            CatalogPredicate::ToneIn(vec!["Silly", "Light"]),
        ]));
    }

    if avg.emotional_light < LOW_THRESHOLD {
        clauses.push(CatalogClause::of(CatalogPredicate::ToneIn(vec![
            "Serious",
            "Emotional",
            "Dark",
        ])));
    } else if avg.emotional_light > HIGH_THRESHOLD {
        clauses.push(CatalogClause::of(CatalogPredicate::ToneIn(vec![
            "Light", "Quirky", "Silly",
        ])));
    }

    if avg.action_dialogue < LOW_THRESHOLD {
        clauses.push(CatalogClause::of(CatalogPredicate::GenreIn(vec![
            "Action",
            "Adventure",
            "War",
        ])));
    } else if avg.action_dialogue > HIGH_THRESHOLD {
        clauses.push(CatalogClause::of(CatalogPredicate::GenreIn(vec![
            "Drama", "Romance",
        ])));
    }

    if avg.realistic_weird < LOW_THRESHOLD {
        clauses.push(CatalogClause::of(CatalogPredicate::StoryTypeNotIn(vec![
            "Mind-bending",
            "Cyberpunk",
            "Fantasy",
        ])));
        clauses.push(CatalogClause::of(CatalogPredicate::GenreNotIn(vec![
            "Sci-Fi",
        ])));
    } else if avg.realistic_weird > HIGH_THRESHOLD {
        clauses.push(CatalogClause::any(vec![
            CatalogPredicate::StoryTypeIn(vec!["Mind-bending", "Surreal"]),
            CatalogPredicate::ToneIn(vec!["Quirky", "Absurdism"]),
            CatalogPredicate::GenreIn(vec!["Sci-Fi", "Fantasy"]),
        ]));
    }

    if avg.classic_modern < LOW_THRESHOLD {
        clauses.push(CatalogClause::of(CatalogPredicate::YearBefore(2000)));
    } else if avg.classic_modern > HIGH_THRESHOLD {
        clauses.push(CatalogClause::of(CatalogPredicate::YearAtLeast(2000)));
    }

    if avg.safe_scary < LOW_THRESHOLD {
        clauses.push(CatalogClause::of(CatalogPredicate::GenreNotIn(vec![
            "Horror", "Thriller",
        ])));
        clauses.push(CatalogClause::of(CatalogPredicate::ToneNotIn(vec![
            "Dark", "Scary", "Violent", "Ominous",
        ])));
    } else if avg.safe_scary > HIGH_THRESHOLD {
        clauses.push(CatalogClause::any(vec![
            CatalogPredicate::GenreIn(vec!["Horror", "Thriller"]),
            CatalogPredicate::ToneIn(vec!["Dark", "Scary", "Suspenseful"]),
        ]));
    }

    if avg.slow_fast < LOW_THRESHOLD {
        clauses.push(CatalogClause::any(vec![
            CatalogPredicate::GenreIn(vec!["Drama", "Documentary", "Romance"]),
            CatalogPredicate::ToneIn(vec!["Slow", "Quiet", "Atmospheric"]),
        ]));
    } else if avg.slow_fast > HIGH_THRESHOLD {
        clauses.push(CatalogClause::any(vec![
            CatalogPredicate::GenreIn(vec!["Action", "Adventure", "Thriller", "Sci-Fi"]),
            CatalogPredicate::ToneIn(vec!["Exciting", "Intense", "Fast-paced"]),
        ]));
    }

    if avg.indie_blockbuster < LOW_THRESHOLD {
        clauses.push(CatalogClause::any(vec![
            CatalogPredicate::SubGenreIn(vec!["Indie", "Arthouse", "Foreign"]),
            CatalogPredicate::RatingAbove(8.5),
        ]));
    } else if avg.indie_blockbuster > HIGH_THRESHOLD {
        clauses.push(CatalogClause::of(CatalogPredicate::GenreIn(vec![
            "Action",
            "Adventure",
            "Sci-Fi",
            "Fantasy",
        ])));
        clauses.push(CatalogClause::of(CatalogPredicate::YearAtLeast(2000)));
    }

    if avg.live_animated < LOW_THRESHOLD {
        clauses.push(CatalogClause::of(CatalogPredicate::GenreNotIn(vec![
            "Animation",
        ])));
    } else if avg.live_animated > HIGH_THRESHOLD {
        clauses.push(CatalogClause::of(CatalogPredicate::GenreIn(vec![
            "Animation",
        ])));
    }

    CatalogFilter { clauses }
}

/// Describe the group's combined taste in one sentence.
pub fn night_profile(avg: &SliderValues) -> String {
    let pairs: [(f32, &str, &str); 9] = [
        (avg.brainy_easy, "Intellectual", "Chill"),
        (avg.emotional_light, "Deeply Emotional", "Lighthearted"),
        (avg.action_dialogue, "Adrenaline-Fueled", "Dialogue-Heavy"),
        (avg.realistic_weird, "Grounded", "Wonderfully Weird"),
        (avg.classic_modern, "Vintage", "Modern"),
        (avg.safe_scary, "Comforting", "Spooky"),
        (avg.slow_fast, "Slow-Burn", "Fast-Paced"),
        (avg.indie_blockbuster, "Artsy", "Big-Budget"),
        (avg.live_animated, "Live-Action", "Animated"),
    ];

    let mut adjectives: Vec<&str> = pairs
        .iter()
        .filter_map(|(value, low, high)| {
            if *value < LOW_THRESHOLD {
                Some(*low)
            } else if *value > HIGH_THRESHOLD {
                Some(*high)
            } else {
                None
            }
        })
        .collect();

    if adjectives.is_empty() {
        return "A Perfectly Balanced Movie Night".into();
    }

    if adjectives.len() > PROFILE_ADJECTIVES {
        adjectives.shuffle(&mut rand::rng());
        adjectives.truncate(PROFILE_ADJECTIVES);
    }

    match adjectives.as_slice() {
        [only] => format!("A {only} Vibe"),
        [init @ .., last] => format!("A {} and {last} Vibe", init.join(", ")),
        [] => unreachable!("adjectives checked non-empty above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn participant(sliders: SliderValues) -> ParticipantEntity {
        ParticipantEntity {
            id: 1,
            session_id: 1,
            nickname: "ana".into(),
            sliders,
            created_at: SystemTime::now(),
        }
    }

    #[test]
    fn averaging_two_participants_is_the_midpoint() {
        let low = SliderValues {
            safe_scary: 1.0,
            ..SliderValues::default()
        };
        let high = SliderValues {
            safe_scary: 4.0,
            ..SliderValues::default()
        };

        let avg = average_sliders(&[participant(low), participant(high)]);
        assert!((avg.safe_scary - 2.5).abs() < f32::EPSILON);
        assert!((avg.brainy_easy - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn neutral_averages_produce_an_empty_filter() {
        let avg = SliderValues::default();
        assert!(catalog_filter(&avg).clauses.is_empty());
        assert_eq!(night_profile(&avg), "A Perfectly Balanced Movie Night");
    }

    #[test]
    fn scary_preference_selects_horror_clause() {
        let avg = SliderValues {
            safe_scary: 4.5,
            ..SliderValues::default()
        };

        let filter = catalog_filter(&avg);
        assert_eq!(filter.clauses.len(), 1);
        assert!(matches!(
            filter.clauses[0].any_of[0],
            CatalogPredicate::GenreIn(ref genres) if genres.contains(&"Horror")
        ));
        assert_eq!(night_profile(&avg), "A Spooky Vibe");
    }

    #[test]
    fn safe_preference_excludes_horror_and_dark_tones() {
        let avg = SliderValues {
            safe_scary: 1.0,
            ..SliderValues::default()
        };

        let filter = catalog_filter(&avg);
        assert_eq!(filter.clauses.len(), 2);
        assert!(matches!(
            filter.clauses[0].any_of[0],
            CatalogPredicate::GenreNotIn(_)
        ));
        assert!(matches!(
            filter.clauses[1].any_of[0],
            CatalogPredicate::ToneNotIn(_)
        ));
    }

    #[test]
    fn profile_caps_at_three_adjectives() {
        let avg = SliderValues {
            brainy_easy: 0.5,
            emotional_light: 0.5,
            action_dialogue: 0.5,
            realistic_weird: 0.5,
            classic_modern: 0.5,
            ..SliderValues::default()
        };

        let profile = night_profile(&avg);
        assert!(profile.starts_with("A "));
        assert!(profile.ends_with(" Vibe"));
        // Three adjectives: one comma-separated pair plus the "and" tail.
        assert_eq!(profile.matches(',').count(), 1);
    }

    #[test]
    fn two_adjectives_join_with_and() {
        let avg = SliderValues {
            classic_modern: 1.0,
            slow_fast: 4.5,
            ..SliderValues::default()
        };

        assert_eq!(night_profile(&avg), "A Vintage and Fast-Paced Vibe");
    }
}
