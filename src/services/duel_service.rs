//! Rock-paper-scissors tie-break: move collection and status over the
//! session-keyed duel store.

use tracing::info;

use crate::{
    dto::{
        common::AckResponse,
        duel::{DuelMoveRequest, DuelStatusResponse},
    },
    error::ServiceError,
    state::{SharedState, duel::DuelBoard},
};

/// Record a move for a participant, creating the board on first use.
///
/// A second move from the same participant and a third distinct participant
/// are both rejected; the board stays as it was.
pub async fn submit_move(
    state: &SharedState,
    session_id: i64,
    request: DuelMoveRequest,
) -> Result<AckResponse, ServiceError> {
    let _gate = state.duel_gate().lock().await;

    let mut board = state.duels().get(session_id).unwrap_or_else(DuelBoard::new);
    board
        .submit(request.participant_id, request.hand)
        .map_err(|err| ServiceError::InvalidState(err.to_string()))?;

    let resolved = board.outcome().is_some();
    state.duels().set(session_id, board);

    if resolved {
        info!(session_id, "duel resolved");
    }

    Ok(AckResponse::ok())
}

/// Snapshot of the duel: moves so far and the result once resolved.
/// Side-effect free; a session without a duel reads as an empty board.
pub async fn status(state: &SharedState, session_id: i64) -> DuelStatusResponse {
    match state.duels().get(session_id) {
        Some(board) => (&board).into(),
        None => DuelStatusResponse::empty(),
    }
}

/// Discard the duel unconditionally. No history is retained.
pub async fn reset(state: &SharedState, session_id: i64) -> AckResponse {
    let _gate = state.duel_gate().lock().await;
    state.duels().remove(session_id);
    AckResponse::ok()
}
