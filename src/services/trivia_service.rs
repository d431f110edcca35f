//! Trivia race: round lifecycle and first-correct-wins arbitration over the
//! session-keyed trivia store.

use tracing::info;

use crate::{
    dto::{
        common::AckResponse,
        trivia::{TriviaAnswerRequest, TriviaAnswerResponse, TriviaStatusResponse},
    },
    state::{
        SharedState,
        trivia::{AnswerOutcome, TriviaRound},
    },
};

/// Open a round with a question from the configured pool.
///
/// Idempotent: while a round is open this is a no-op and pollers keep seeing
/// the same question. A decided round is replaced by a fresh one.
pub async fn start(state: &SharedState, session_id: i64) -> AckResponse {
    let _gate = state.trivia_gate().lock().await;

    if let Some(round) = state.trivia().get(session_id)
        && round.is_open()
    {
        return AckResponse::ok();
    }

    let question = state.config().random_question();
    state.trivia().set(session_id, TriviaRound::new(question));
    info!(session_id, "trivia round started");

    AckResponse::ok()
}

/// Read-only snapshot for pollers. Never opens a round; starting is a
/// separate, explicit action.
pub async fn status(state: &SharedState, session_id: i64) -> TriviaStatusResponse {
    match state.trivia().get(session_id) {
        Some(round) => (&round).into(),
        None => TriviaStatusResponse::inactive(),
    }
}

/// Judge a submission against the current round.
///
/// The gate makes the judge-and-pin step atomic: exactly one submission per
/// round can observe the open state and become the winner; everyone after
/// that loses with "round already decided", correct or not.
pub async fn answer(
    state: &SharedState,
    session_id: i64,
    request: TriviaAnswerRequest,
) -> TriviaAnswerResponse {
    let _gate = state.trivia_gate().lock().await;

    let Some(mut round) = state.trivia().get(session_id) else {
        return TriviaAnswerResponse {
            success: false,
            winner: None,
            message: Some("no trivia round is active".into()),
        };
    };

    match round.submit(request.participant_id, &request.nickname, &request.answer) {
        AnswerOutcome::Won(winner) => {
            state.trivia().set(session_id, round);
            info!(
                session_id,
                participant_id = winner.id,
                nickname = %winner.nickname,
                "trivia round won"
            );
            TriviaAnswerResponse {
                success: true,
                winner: Some(winner),
                message: None,
            }
        }
        AnswerOutcome::Incorrect => TriviaAnswerResponse {
            success: false,
            winner: None,
            message: Some("incorrect answer".into()),
        },
        AnswerOutcome::AlreadyDecided(winner) => TriviaAnswerResponse {
            success: false,
            winner: Some(winner),
            message: Some("round already decided".into()),
        },
    }
}

/// Discard the round unconditionally.
pub async fn reset(state: &SharedState, session_id: i64) -> AckResponse {
    let _gate = state.trivia_gate().lock().await;
    state.trivia().remove(session_id);
    AckResponse::ok()
}
