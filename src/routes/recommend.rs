use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};

use crate::{
    dto::recommend::RecommendationsResponse,
    error::AppError,
    services::recommendation_service,
    state::SharedState,
};

/// Routes handling recommendation rounds.
pub fn router() -> Router<SharedState> {
    Router::new().route("/sessions/{id}/recommendations", post(get_recommendations))
}

/// Compute a recommendation round from the participants' averaged sliders.
#[utoipa::path(
    post,
    path = "/sessions/{id}/recommendations",
    tag = "recommend",
    params(("id" = i64, Path, description = "Identifier of the session")),
    responses(
        (status = 200, description = "Recommendations computed", body = RecommendationsResponse),
        (status = 400, description = "Session has no participants")
    )
)]
pub async fn get_recommendations(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let response = recommendation_service::recommendations(&state, id).await?;
    Ok(Json(response))
}
