use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use validator::Validate;

use crate::{
    dto::{
        common::AckResponse,
        list::{AddEntryRequest, FinalizeResponse, SharedListResponse, VoteRequest, VoteResponse},
    },
    error::AppError,
    services::list_service,
    state::SharedState,
};

/// Routes handling the shared list: curation, voting, and eviction.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/sessions/{id}/list", post(add_entry).get(get_shared_list))
        .route("/sessions/{id}/vote", post(cast_vote))
        .route("/sessions/{id}/finalize", post(finalize))
        .route("/sessions/{id}/list/{movie_id}", delete(remove_entry))
}

/// Propose a movie for the shared list. Re-adding is a no-op.
#[utoipa::path(
    post,
    path = "/sessions/{id}/list",
    tag = "list",
    params(("id" = i64, Path, description = "Identifier of the session")),
    request_body = AddEntryRequest,
    responses(
        (status = 200, description = "Entry present on the list", body = AckResponse),
        (status = 404, description = "No session with this id")
    )
)]
pub async fn add_entry(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<AddEntryRequest>,
) -> Result<Json<AckResponse>, AppError> {
    let response = list_service::add_entry(&state, id, payload).await?;
    Ok(Json(response))
}

/// The shared list with read-time vote aggregates.
#[utoipa::path(
    get,
    path = "/sessions/{id}/list",
    tag = "list",
    params(("id" = i64, Path, description = "Identifier of the session")),
    responses(
        (status = 200, description = "Shared list of the session", body = SharedListResponse)
    )
)]
pub async fn get_shared_list(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<SharedListResponse>, AppError> {
    let response = list_service::shared_list(&state, id).await?;
    Ok(Json(response))
}

/// Cast or change a vote; may evict the movie when it collects two dislikes.
#[utoipa::path(
    post,
    path = "/sessions/{id}/vote",
    tag = "list",
    params(("id" = i64, Path, description = "Identifier of the session")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote recorded", body = VoteResponse)
    )
)]
pub async fn cast_vote(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, AppError> {
    payload.validate()?;
    let response = list_service::cast_vote(&state, id, payload).await?;
    Ok(Json(response))
}

/// Apply the eviction rule to the whole list as a one-shot batch.
#[utoipa::path(
    post,
    path = "/sessions/{id}/finalize",
    tag = "list",
    params(("id" = i64, Path, description = "Identifier of the session")),
    responses(
        (status = 200, description = "Batch eviction applied", body = FinalizeResponse)
    )
)]
pub async fn finalize(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<FinalizeResponse>, AppError> {
    let response = list_service::finalize(&state, id).await?;
    Ok(Json(response))
}

/// Remove a movie unconditionally. Gated externally by a trivia win.
#[utoipa::path(
    delete,
    path = "/sessions/{id}/list/{movie_id}",
    tag = "list",
    params(
        ("id" = i64, Path, description = "Identifier of the session"),
        ("movie_id" = i64, Path, description = "Movie to remove"),
    ),
    responses(
        (status = 200, description = "Entry removed (or already absent)", body = AckResponse)
    )
)]
pub async fn remove_entry(
    State(state): State<SharedState>,
    Path((id, movie_id)): Path<(i64, i64)>,
) -> Result<Json<AckResponse>, AppError> {
    let response = list_service::remove_entry(&state, id, movie_id).await?;
    Ok(Json(response))
}
