use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::{
        common::AckResponse,
        history::{AddHistoryRequest, HistoryResponse},
    },
    error::AppError,
    services::history_service,
    state::SharedState,
};

/// Routes handling the watch history of a session.
pub fn router() -> Router<SharedState> {
    Router::new().route("/sessions/{id}/history", post(add_entry).get(get_history))
}

/// Record a movie the session watched.
#[utoipa::path(
    post,
    path = "/sessions/{id}/history",
    tag = "history",
    params(("id" = i64, Path, description = "Identifier of the session")),
    request_body = AddHistoryRequest,
    responses(
        (status = 200, description = "History entry recorded", body = AckResponse),
        (status = 404, description = "No session with this id")
    )
)]
pub async fn add_entry(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<AddHistoryRequest>,
) -> Result<Json<AckResponse>, AppError> {
    payload.validate()?;
    let response = history_service::add_entry(&state, id, payload).await?;
    Ok(Json(response))
}

/// The session's watch history, newest first.
#[utoipa::path(
    get,
    path = "/sessions/{id}/history",
    tag = "history",
    params(("id" = i64, Path, description = "Identifier of the session")),
    responses(
        (status = 200, description = "Watch history", body = HistoryResponse)
    )
)]
pub async fn get_history(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<HistoryResponse>, AppError> {
    let response = history_service::history(&state, id).await?;
    Ok(Json(response))
}
