use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use validator::Validate;

use crate::{
    dto::{
        common::AckResponse,
        session::{
            CreateSessionResponse, JoinRequest, ParticipantSummary, ParticipantsResponse,
            SessionSummary, VisibilityRequest,
        },
    },
    error::AppError,
    services::session_service,
    state::SharedState,
};

/// Routes handling session lifecycle and participants.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/code/{code}", get(get_session_by_code))
        .route("/sessions/id/{id}", get(get_session_by_id))
        .route("/sessions/{id}/visibility", put(set_visibility))
        .route("/sessions/{id}/join", post(join_session))
        .route("/sessions/{id}/participants", get(get_participants))
}

/// Create a fresh session and return its join code.
#[utoipa::path(
    post,
    path = "/sessions",
    tag = "session",
    responses(
        (status = 200, description = "Session created", body = CreateSessionResponse)
    )
)]
pub async fn create_session(
    State(state): State<SharedState>,
) -> Result<Json<CreateSessionResponse>, AppError> {
    let response = session_service::create_session(&state).await?;
    Ok(Json(response))
}

/// Look a session up by its join code.
#[utoipa::path(
    get,
    path = "/sessions/code/{code}",
    tag = "session",
    params(("code" = String, Path, description = "Join code of the session")),
    responses(
        (status = 200, description = "Session found", body = SessionSummary),
        (status = 404, description = "No session with this code")
    )
)]
pub async fn get_session_by_code(
    State(state): State<SharedState>,
    Path(code): Path<String>,
) -> Result<Json<SessionSummary>, AppError> {
    let summary = session_service::session_by_code(&state, &code).await?;
    Ok(Json(summary))
}

/// Look a session up by its numeric identifier.
#[utoipa::path(
    get,
    path = "/sessions/id/{id}",
    tag = "session",
    params(("id" = i64, Path, description = "Identifier of the session")),
    responses(
        (status = 200, description = "Session found", body = SessionSummary),
        (status = 404, description = "No session with this id")
    )
)]
pub async fn get_session_by_id(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<SessionSummary>, AppError> {
    let summary = session_service::session_by_id(&state, id).await?;
    Ok(Json(summary))
}

/// Toggle whether the session is publicly listed.
#[utoipa::path(
    put,
    path = "/sessions/{id}/visibility",
    tag = "session",
    params(("id" = i64, Path, description = "Identifier of the session")),
    request_body = VisibilityRequest,
    responses(
        (status = 200, description = "Visibility updated", body = AckResponse),
        (status = 404, description = "No session with this id")
    )
)]
pub async fn set_visibility(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<VisibilityRequest>,
) -> Result<Json<AckResponse>, AppError> {
    let response = session_service::set_visibility(&state, id, payload).await?;
    Ok(Json(response))
}

/// Join a session with a nickname and taste preferences.
#[utoipa::path(
    post,
    path = "/sessions/{id}/join",
    tag = "session",
    params(("id" = i64, Path, description = "Identifier of the session")),
    request_body = JoinRequest,
    responses(
        (status = 200, description = "Participant created", body = ParticipantSummary),
        (status = 404, description = "No session with this id")
    )
)]
pub async fn join_session(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(payload): Json<JoinRequest>,
) -> Result<Json<ParticipantSummary>, AppError> {
    payload.validate()?;
    let summary = session_service::join(&state, id, payload).await?;
    Ok(Json(summary))
}

/// List the participants of a session.
#[utoipa::path(
    get,
    path = "/sessions/{id}/participants",
    tag = "session",
    params(("id" = i64, Path, description = "Identifier of the session")),
    responses(
        (status = 200, description = "Participants of the session", body = ParticipantsResponse)
    )
)]
pub async fn get_participants(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<ParticipantsResponse>, AppError> {
    let response = session_service::participants(&state, id).await?;
    Ok(Json(response))
}
