//! End-to-end tests of the coordination core: voting with auto-eviction, the
//! duel tie-break, the trivia race, and recommendation rounds, all driven
//! through the service layer against the in-memory store.

use std::sync::Arc;

use serde_json::json;

use reel_sync_back::{
    config::{AppConfig, TriviaQuestion},
    dao::{
        models::{MovieEntity, SliderValues, VoteEntity, VoteValue},
        session_store::{SessionStore, memory::MemorySessionStore},
    },
    dto::{
        duel::{DuelMoveRequest, DuelOutcomeKind},
        list::{AddEntryRequest, VoteRequest},
        session::JoinRequest,
        trivia::TriviaAnswerRequest,
    },
    error::ServiceError,
    services::{
        duel_service, list_service, recommendation_service, session_service, trivia_service,
    },
    state::{AppState, SharedState, duel::DuelMove},
};

async fn test_state_with_config(config: AppConfig) -> (SharedState, MemorySessionStore) {
    let store = MemorySessionStore::new();
    let state = AppState::new(config);
    state.set_session_store(Arc::new(store.clone())).await;
    (state, store)
}

async fn test_state() -> (SharedState, MemorySessionStore) {
    test_state_with_config(AppConfig::default()).await
}

async fn new_session(state: &SharedState) -> i64 {
    session_service::create_session(state).await.unwrap().id
}

async fn join(state: &SharedState, session_id: i64, nickname: &str) -> i64 {
    session_service::join(
        state,
        session_id,
        JoinRequest {
            nickname: nickname.into(),
            sliders: SliderValues::default(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn add_movie(state: &SharedState, session_id: i64, movie_id: i64, added_by: i64) {
    list_service::add_entry(
        state,
        session_id,
        AddEntryRequest {
            movie_id,
            movie_data: json!({ "title": format!("movie-{movie_id}") }),
            added_by,
        },
    )
    .await
    .unwrap();
}

async fn vote(state: &SharedState, session_id: i64, movie_id: i64, actor: i64, value: i8) -> bool {
    list_service::cast_vote(
        state,
        session_id,
        VoteRequest {
            movie_id,
            participant_id: actor,
            value,
        },
    )
    .await
    .unwrap()
    .removed
}

fn movie(id: i64, genre: &str, tone: &str, year: i32, rating: f32) -> MovieEntity {
    MovieEntity {
        id,
        title: format!("movie-{id}"),
        year,
        genre: genre.into(),
        sub_genre: "General".into(),
        story_type: "Classic".into(),
        tone: tone.into(),
        rating,
        poster_path: None,
        overview: String::new(),
        runtime: 100,
        original_language: "en".into(),
        origin_country: "US".into(),
        cast: vec!["Someone".into()],
    }
}

// --- sessions ---

#[tokio::test]
async fn session_roundtrip_by_code_and_id() {
    let (state, _store) = test_state().await;

    let created = session_service::create_session(&state).await.unwrap();
    assert_eq!(created.code.len(), 6);

    let by_code = session_service::session_by_code(&state, &created.code)
        .await
        .unwrap();
    assert_eq!(by_code.id, created.id);
    assert!(!by_code.is_public);

    let by_id = session_service::session_by_id(&state, created.id)
        .await
        .unwrap();
    assert_eq!(by_id.code, created.code);
}

#[tokio::test]
async fn join_requires_an_existing_session() {
    let (state, _store) = test_state().await;

    let err = session_service::join(
        &state,
        424242,
        JoinRequest {
            nickname: "ana".into(),
            sliders: SliderValues::default(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn everything_degrades_without_a_store() {
    let state = AppState::new(AppConfig::default());
    let err = session_service::create_session(&state).await.unwrap_err();
    assert!(matches!(err, ServiceError::Degraded));
}

// --- vote ledger ---

#[tokio::test]
async fn revoting_replaces_instead_of_accumulating() {
    let (state, _store) = test_state().await;
    let session = new_session(&state).await;
    let ana = join(&state, session, "ana").await;
    add_movie(&state, session, 10, ana).await;

    assert!(!vote(&state, session, 10, ana, 1).await);
    assert!(!vote(&state, session, 10, ana, -1).await);

    let list = list_service::shared_list(&state, session).await.unwrap();
    let item = &list.items[0];
    assert_eq!((item.likes, item.dislikes), (0, 1));

    assert!(!vote(&state, session, 10, ana, 1).await);
    let list = list_service::shared_list(&state, session).await.unwrap();
    let item = &list.items[0];
    assert_eq!((item.likes, item.dislikes), (1, 0));
}

#[tokio::test]
async fn second_dislike_evicts_entry_and_votes() {
    let (state, _store) = test_state().await;
    let session = new_session(&state).await;
    let ana = join(&state, session, "ana").await;
    let ben = join(&state, session, "ben").await;
    add_movie(&state, session, 10, ana).await;

    assert!(!vote(&state, session, 10, ana, -1).await);
    assert!(vote(&state, session, 10, ben, -1).await);

    let list = list_service::shared_list(&state, session).await.unwrap();
    assert!(list.items.is_empty());

    // Re-adding the movie starts from a clean slate: the old votes are gone.
    add_movie(&state, session, 10, ana).await;
    let list = list_service::shared_list(&state, session).await.unwrap();
    assert_eq!((list.items[0].likes, list.items[0].dislikes), (0, 0));
}

#[tokio::test]
async fn changing_a_like_to_a_dislike_can_evict() {
    let (state, _store) = test_state().await;
    let session = new_session(&state).await;
    let ana = join(&state, session, "ana").await;
    let ben = join(&state, session, "ben").await;
    add_movie(&state, session, 10, ana).await;

    assert!(!vote(&state, session, 10, ana, -1).await);
    assert!(!vote(&state, session, 10, ben, 1).await);
    // Ben flips; the same operation recounts and evicts.
    assert!(vote(&state, session, 10, ben, -1).await);

    let list = list_service::shared_list(&state, session).await.unwrap();
    assert!(list.items.is_empty());
}

#[tokio::test]
async fn likes_alone_never_evict() {
    let (state, _store) = test_state().await;
    let session = new_session(&state).await;
    let ana = join(&state, session, "ana").await;
    add_movie(&state, session, 10, ana).await;

    for actor in [ana, 1001, 1002, 1003] {
        assert!(!vote(&state, session, 10, actor, 1).await);
    }

    let list = list_service::shared_list(&state, session).await.unwrap();
    assert_eq!(list.items[0].likes, 4);
}

#[tokio::test]
async fn match_and_split_are_derived_at_read_time() {
    let (state, _store) = test_state().await;
    let session = new_session(&state).await;
    let ana = join(&state, session, "ana").await;
    let ben = join(&state, session, "ben").await;
    let cam = join(&state, session, "cam").await;
    add_movie(&state, session, 10, ana).await;

    vote(&state, session, 10, ana, 1).await;
    let list = list_service::shared_list(&state, session).await.unwrap();
    assert!(!list.items[0].is_match);
    assert!(!list.items[0].is_split_decision);

    vote(&state, session, 10, ben, 1).await;
    let list = list_service::shared_list(&state, session).await.unwrap();
    assert!(list.items[0].is_match);
    assert!(!list.items[0].is_split_decision);

    vote(&state, session, 10, cam, -1).await;
    let list = list_service::shared_list(&state, session).await.unwrap();
    assert!(list.items[0].is_match);
    assert!(list.items[0].is_split_decision);
}

#[tokio::test]
async fn adding_twice_is_an_idempotent_no_op() {
    let (state, _store) = test_state().await;
    let session = new_session(&state).await;
    let ana = join(&state, session, "ana").await;

    add_movie(&state, session, 10, ana).await;
    vote(&state, session, 10, ana, 1).await;
    add_movie(&state, session, 10, ana).await;

    let list = list_service::shared_list(&state, session).await.unwrap();
    assert_eq!(list.items.len(), 1);
    // The original entry (and its vote) survived the duplicate add.
    assert_eq!(list.items[0].likes, 1);
}

#[tokio::test]
async fn finalize_sweeps_over_threshold_entries() {
    let (state, store) = test_state().await;
    let session = new_session(&state).await;
    let ana = join(&state, session, "ana").await;
    add_movie(&state, session, 10, ana).await;
    add_movie(&state, session, 11, ana).await;

    // Seed an over-threshold vote set directly, as if it predated the
    // per-vote eviction (e.g. imported data).
    for (actor, movie_id) in [(1, 10), (2, 10)] {
        store
            .upsert_vote(VoteEntity {
                session_id: session,
                movie_id,
                participant_id: actor,
                value: VoteValue::Dislike,
            })
            .await
            .unwrap();
    }

    let response = list_service::finalize(&state, session).await.unwrap();
    assert_eq!(response.removed_movie_ids, vec![10]);

    let list = list_service::shared_list(&state, session).await.unwrap();
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].movie_id, 11);

    // A second pass finds nothing left to evict.
    let response = list_service::finalize(&state, session).await.unwrap();
    assert!(response.removed_movie_ids.is_empty());
}

#[tokio::test]
async fn remove_entry_ignores_vote_counts() {
    let (state, _store) = test_state().await;
    let session = new_session(&state).await;
    let ana = join(&state, session, "ana").await;
    add_movie(&state, session, 10, ana).await;
    vote(&state, session, 10, ana, 1).await;

    list_service::remove_entry(&state, session, 10).await.unwrap();
    let list = list_service::shared_list(&state, session).await.unwrap();
    assert!(list.items.is_empty());

    // Removing an absent movie is still a success.
    list_service::remove_entry(&state, session, 10).await.unwrap();
}

// --- duel ---

#[tokio::test]
async fn duel_resolves_rock_over_scissors() {
    let (state, _store) = test_state().await;
    let session = 7;

    duel_service::submit_move(
        &state,
        session,
        DuelMoveRequest {
            participant_id: 1,
            hand: DuelMove::Rock,
        },
    )
    .await
    .unwrap();

    let status = duel_service::status(&state, session).await;
    assert_eq!(status.moves.len(), 1);
    assert!(status.result.is_none());

    duel_service::submit_move(
        &state,
        session,
        DuelMoveRequest {
            participant_id: 2,
            hand: DuelMove::Scissors,
        },
    )
    .await
    .unwrap();

    let status = duel_service::status(&state, session).await;
    let result = status.result.expect("duel should be resolved");
    assert!(matches!(result.outcome, DuelOutcomeKind::Winner));
    assert_eq!(result.winner, Some(1));
}

#[tokio::test]
async fn duel_equal_hands_draw() {
    let (state, _store) = test_state().await;
    let session = 7;

    for actor in [1, 2] {
        duel_service::submit_move(
            &state,
            session,
            DuelMoveRequest {
                participant_id: actor,
                hand: DuelMove::Rock,
            },
        )
        .await
        .unwrap();
    }

    let status = duel_service::status(&state, session).await;
    let result = status.result.expect("duel should be resolved");
    assert!(matches!(result.outcome, DuelOutcomeKind::Draw));
    assert_eq!(result.winner, None);
}

#[tokio::test]
async fn duel_rejects_double_moves_and_third_actors() {
    let (state, _store) = test_state().await;
    let session = 7;

    duel_service::submit_move(
        &state,
        session,
        DuelMoveRequest {
            participant_id: 1,
            hand: DuelMove::Rock,
        },
    )
    .await
    .unwrap();

    let err = duel_service::submit_move(
        &state,
        session,
        DuelMoveRequest {
            participant_id: 1,
            hand: DuelMove::Paper,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidState(_)));

    duel_service::submit_move(
        &state,
        session,
        DuelMoveRequest {
            participant_id: 2,
            hand: DuelMove::Paper,
        },
    )
    .await
    .unwrap();

    let err = duel_service::submit_move(
        &state,
        session,
        DuelMoveRequest {
            participant_id: 3,
            hand: DuelMove::Scissors,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidState(_)));

    // The rejected submissions left the board untouched.
    let status = duel_service::status(&state, session).await;
    assert_eq!(status.moves.len(), 2);
    assert_eq!(status.result.unwrap().winner, Some(2));
}

#[tokio::test]
async fn duel_reset_returns_to_a_fresh_board() {
    let (state, _store) = test_state().await;
    let session = 7;

    for (actor, hand) in [(1, DuelMove::Rock), (2, DuelMove::Scissors)] {
        duel_service::submit_move(
            &state,
            session,
            DuelMoveRequest {
                participant_id: actor,
                hand,
            },
        )
        .await
        .unwrap();
    }

    duel_service::reset(&state, session).await;

    let status = duel_service::status(&state, session).await;
    assert!(status.moves.is_empty());
    assert!(status.result.is_none());

    // A previously rejected third actor can play on the fresh board.
    duel_service::submit_move(
        &state,
        session,
        DuelMoveRequest {
            participant_id: 3,
            hand: DuelMove::Paper,
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn duels_in_different_sessions_are_independent() {
    let (state, _store) = test_state().await;

    duel_service::submit_move(
        &state,
        1,
        DuelMoveRequest {
            participant_id: 1,
            hand: DuelMove::Rock,
        },
    )
    .await
    .unwrap();

    let status = duel_service::status(&state, 2).await;
    assert!(status.moves.is_empty());
}

// --- trivia ---

fn single_question_config() -> AppConfig {
    AppConfig::with_pools(
        vec![TriviaQuestion {
            prompt: "What is the answer to everything?".into(),
            options: vec!["7".into(), "42".into(), "3.14".into()],
            answer: "42".into(),
        }],
        Vec::new(),
    )
}

#[tokio::test]
async fn trivia_first_correct_answer_wins_the_race() {
    let (state, _store) = test_state_with_config(single_question_config()).await;
    let session = 7;

    trivia_service::start(&state, session).await;

    let wrong = trivia_service::answer(
        &state,
        session,
        TriviaAnswerRequest {
            participant_id: 1,
            nickname: "ana".into(),
            answer: "7".into(),
        },
    )
    .await;
    assert!(!wrong.success);
    assert_eq!(wrong.message.as_deref(), Some("incorrect answer"));

    let status = trivia_service::status(&state, session).await;
    assert!(status.active);
    assert!(status.winner.is_none());

    let win = trivia_service::answer(
        &state,
        session,
        TriviaAnswerRequest {
            participant_id: 2,
            nickname: "ben".into(),
            answer: "42".into(),
        },
    )
    .await;
    assert!(win.success);
    assert_eq!(win.winner.as_ref().map(|w| w.id), Some(2));

    // A later correct answer loses and the winner is pinned.
    let late = trivia_service::answer(
        &state,
        session,
        TriviaAnswerRequest {
            participant_id: 3,
            nickname: "cam".into(),
            answer: "42".into(),
        },
    )
    .await;
    assert!(!late.success);
    assert_eq!(late.message.as_deref(), Some("round already decided"));
    assert_eq!(late.winner.as_ref().map(|w| w.id), Some(2));

    let status = trivia_service::status(&state, session).await;
    assert!(!status.active);
    assert_eq!(status.winner.map(|w| w.nickname), Some("ben".into()));
}

#[tokio::test]
async fn trivia_answers_are_matched_case_insensitively() {
    let (state, _store) = test_state_with_config(AppConfig::with_pools(
        vec![TriviaQuestion {
            prompt: "Which movie features a volleyball named Wilson?".into(),
            options: vec!["Cast Away".into(), "The Beach".into()],
            answer: "Cast Away".into(),
        }],
        Vec::new(),
    ))
    .await;
    let session = 7;

    trivia_service::start(&state, session).await;

    let win = trivia_service::answer(
        &state,
        session,
        TriviaAnswerRequest {
            participant_id: 1,
            nickname: "ana".into(),
            answer: "  cast away ".into(),
        },
    )
    .await;
    assert!(win.success);
}

#[tokio::test]
async fn trivia_start_is_idempotent_while_open() {
    let (state, _store) = test_state().await;
    let session = 7;

    trivia_service::start(&state, session).await;
    let first = trivia_service::status(&state, session).await;
    let first_prompt = first.question.as_ref().unwrap().prompt.clone();

    trivia_service::start(&state, session).await;
    let second = trivia_service::status(&state, session).await;
    assert_eq!(second.question.unwrap().prompt, first_prompt);
}

#[tokio::test]
async fn trivia_status_never_starts_a_round() {
    let (state, _store) = test_state().await;

    let status = trivia_service::status(&state, 7).await;
    assert!(!status.active);
    assert!(status.question.is_none());

    // Still inactive: the read did not open a round.
    let status = trivia_service::status(&state, 7).await;
    assert!(!status.active);
}

#[tokio::test]
async fn trivia_answer_without_a_round_is_a_typed_failure() {
    let (state, _store) = test_state().await;

    let response = trivia_service::answer(
        &state,
        7,
        TriviaAnswerRequest {
            participant_id: 1,
            nickname: "ana".into(),
            answer: "42".into(),
        },
    )
    .await;
    assert!(!response.success);
    assert!(response.message.is_some());
}

#[tokio::test]
async fn trivia_reset_allows_a_fresh_round() {
    let (state, _store) = test_state_with_config(single_question_config()).await;
    let session = 7;

    trivia_service::start(&state, session).await;
    trivia_service::answer(
        &state,
        session,
        TriviaAnswerRequest {
            participant_id: 2,
            nickname: "ben".into(),
            answer: "42".into(),
        },
    )
    .await;

    trivia_service::reset(&state, session).await;
    let status = trivia_service::status(&state, session).await;
    assert!(!status.active);
    assert!(status.winner.is_none());

    // Indistinguishable from a fresh session: the race can run again.
    trivia_service::start(&state, session).await;
    let win = trivia_service::answer(
        &state,
        session,
        TriviaAnswerRequest {
            participant_id: 3,
            nickname: "cam".into(),
            answer: "42".into(),
        },
    )
    .await;
    assert!(win.success);
    assert_eq!(win.winner.map(|w| w.id), Some(3));
}

#[tokio::test]
async fn starting_over_a_decided_round_opens_a_new_one() {
    let (state, _store) = test_state_with_config(single_question_config()).await;
    let session = 7;

    trivia_service::start(&state, session).await;
    trivia_service::answer(
        &state,
        session,
        TriviaAnswerRequest {
            participant_id: 2,
            nickname: "ben".into(),
            answer: "42".into(),
        },
    )
    .await;

    trivia_service::start(&state, session).await;
    let status = trivia_service::status(&state, session).await;
    assert!(status.active);
    assert!(status.winner.is_none());
}

// --- recommendations ---

#[tokio::test]
async fn recommendations_follow_the_group_taste() {
    let (state, store) = test_state().await;
    store.seed_movies([
        movie(1, "Horror", "Scary", 2019, 6.8),
        movie(2, "Comedy", "Silly", 2015, 7.1),
        movie(3, "Thriller", "Suspenseful", 2008, 7.9),
    ]);

    let session = new_session(&state).await;
    for nickname in ["ana", "ben"] {
        session_service::join(
            &state,
            session,
            JoinRequest {
                nickname: nickname.into(),
                sliders: SliderValues {
                    safe_scary: 4.5,
                    ..SliderValues::default()
                },
            },
        )
        .await
        .unwrap();
    }

    let response = recommendation_service::recommendations(&state, session)
        .await
        .unwrap();

    let ids: Vec<i64> = response.results.iter().map(|m| m.id).collect();
    assert!(ids.contains(&1));
    assert!(ids.contains(&3));
    assert!(!ids.contains(&2));
    assert_eq!(response.profile, "A Spooky Vibe");
    assert_eq!(response.modifiers.len(), 3);
    assert!((response.avg_sliders.safe_scary - 4.5).abs() < 1e-5);
}

#[tokio::test]
async fn recommendations_fall_back_to_top_rated() {
    let (state, store) = test_state().await;
    store.seed_movies([
        movie(1, "Comedy", "Silly", 2015, 7.1),
        movie(2, "Comedy", "Light", 2018, 8.2),
    ]);

    let session = new_session(&state).await;
    session_service::join(
        &state,
        session,
        JoinRequest {
            nickname: "ana".into(),
            sliders: SliderValues {
                safe_scary: 4.5,
                ..SliderValues::default()
            },
        },
    )
    .await
    .unwrap();

    // Nothing scary in the catalog: the round still returns movies.
    let response = recommendation_service::recommendations(&state, session)
        .await
        .unwrap();
    assert_eq!(response.results.len(), 2);
}

#[tokio::test]
async fn recommendations_require_participants() {
    let (state, _store) = test_state().await;
    let session = new_session(&state).await;

    let err = recommendation_service::recommendations(&state, session)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}
