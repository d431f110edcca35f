use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::{
        common::AckResponse,
        duel::{DuelMoveRequest, DuelStatusResponse},
    },
    error::AppError,
    services::duel_service,
    state::SharedState,
};

/// Routes handling the rock-paper-scissors tie-break.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/sessions/{id}/duel/move", post(submit_move))
        .route("/sessions/{id}/duel", get(get_status))
        .route("/sessions/{id}/duel/reset", post(reset))
}

/// Submit a duel move. Moves are write-once and the board seats two.
#[utoipa::path(
    post,
    path = "/sessions/{id}/duel/move",
    tag = "duel",
    params(("id" = i64, Path, description = "Identifier of the session")),
    request_body = DuelMoveRequest,
    responses(
        (status = 200, description = "Move recorded", body = AckResponse),
        (status = 409, description = "Actor already played or the board is full")
    )
)]
pub async fn submit_move(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<DuelMoveRequest>,
) -> Result<Json<AckResponse>, AppError> {
    let response = duel_service::submit_move(&state, id, payload).await?;
    Ok(Json(response))
}

/// Duel snapshot: moves so far, result once both moves are in.
#[utoipa::path(
    get,
    path = "/sessions/{id}/duel",
    tag = "duel",
    params(("id" = i64, Path, description = "Identifier of the session")),
    responses(
        (status = 200, description = "Current duel state", body = DuelStatusResponse)
    )
)]
pub async fn get_status(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Json<DuelStatusResponse> {
    Json(duel_service::status(&state, id).await)
}

/// Discard the duel so a new one can start.
#[utoipa::path(
    post,
    path = "/sessions/{id}/duel/reset",
    tag = "duel",
    params(("id" = i64, Path, description = "Identifier of the session")),
    responses(
        (status = 200, description = "Duel cleared", body = AckResponse)
    )
)]
pub async fn reset(State(state): State<SharedState>, Path(id): Path<i64>) -> Json<AckResponse> {
    Json(duel_service::reset(&state, id).await)
}
