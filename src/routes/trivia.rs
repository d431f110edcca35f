use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::{
        common::AckResponse,
        trivia::{TriviaAnswerRequest, TriviaAnswerResponse, TriviaStatusResponse},
    },
    services::trivia_service,
    state::SharedState,
};

/// Routes handling the first-correct-wins trivia race.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/sessions/{id}/trivia/start", post(start))
        .route("/sessions/{id}/trivia", get(get_status))
        .route("/sessions/{id}/trivia/answer", post(submit_answer))
        .route("/sessions/{id}/trivia/reset", post(reset))
}

/// Open a trivia round. A no-op while a round is already open.
#[utoipa::path(
    post,
    path = "/sessions/{id}/trivia/start",
    tag = "trivia",
    params(("id" = i64, Path, description = "Identifier of the session")),
    responses(
        (status = 200, description = "A round is open", body = AckResponse)
    )
)]
pub async fn start(State(state): State<SharedState>, Path(id): Path<i64>) -> Json<AckResponse> {
    Json(trivia_service::start(&state, id).await)
}

/// Round snapshot for pollers. Never opens a round.
#[utoipa::path(
    get,
    path = "/sessions/{id}/trivia",
    tag = "trivia",
    params(("id" = i64, Path, description = "Identifier of the session")),
    responses(
        (status = 200, description = "Current trivia state", body = TriviaStatusResponse)
    )
)]
pub async fn get_status(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Json<TriviaStatusResponse> {
    Json(trivia_service::status(&state, id).await)
}

/// Race an answer. The first correct submission wins the round; all later
/// ones lose, correct or not.
#[utoipa::path(
    post,
    path = "/sessions/{id}/trivia/answer",
    tag = "trivia",
    params(("id" = i64, Path, description = "Identifier of the session")),
    request_body = TriviaAnswerRequest,
    responses(
        (status = 200, description = "Submission judged", body = TriviaAnswerResponse)
    )
)]
pub async fn submit_answer(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<TriviaAnswerRequest>,
) -> Json<TriviaAnswerResponse> {
    Json(trivia_service::answer(&state, id, payload).await)
}

/// Discard the round so a new one can start.
#[utoipa::path(
    post,
    path = "/sessions/{id}/trivia/reset",
    tag = "trivia",
    params(("id" = i64, Path, description = "Identifier of the session")),
    responses(
        (status = 200, description = "Round cleared", body = AckResponse)
    )
)]
pub async fn reset(State(state): State<SharedState>, Path(id): Path<i64>) -> Json<AckResponse> {
    Json(trivia_service::reset(&state, id).await)
}
