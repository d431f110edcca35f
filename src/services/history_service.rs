//! Watch-history records: what the session actually ended up watching.

use std::time::SystemTime;

use crate::{
    dao::models::HistoryEntryEntity,
    dto::{
        common::AckResponse,
        history::{AddHistoryRequest, HistoryResponse},
    },
    error::ServiceError,
    state::SharedState,
};

/// Record a watched movie for a session.
pub async fn add_entry(
    state: &SharedState,
    session_id: i64,
    request: AddHistoryRequest,
) -> Result<AckResponse, ServiceError> {
    let store = state.require_session_store().await?;

    if store.find_session(session_id).await?.is_none() {
        return Err(ServiceError::NotFound(format!(
            "session `{session_id}` not found"
        )));
    }

    store
        .add_history_entry(HistoryEntryEntity {
            session_id,
            movie_id: request.movie_id,
            movie_title: request.movie_title,
            movie_data: request.movie_data,
            rating: request.rating,
            watched_on: SystemTime::now(),
        })
        .await?;

    Ok(AckResponse::ok())
}

/// The session's watch history, newest first.
pub async fn history(
    state: &SharedState,
    session_id: i64,
) -> Result<HistoryResponse, ServiceError> {
    let store = state.require_session_store().await?;
    let items = store
        .list_history(session_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(HistoryResponse { items })
}
