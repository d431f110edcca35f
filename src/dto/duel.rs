use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::duel::{DuelBoard, DuelMove, DuelOutcome};

/// Request submitting a duel move.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DuelMoveRequest {
    /// Participant playing the move.
    pub participant_id: i64,
    /// The hand played.
    #[serde(rename = "move")]
    pub hand: DuelMove,
}

/// One recorded move, in arrival order.
#[derive(Debug, Serialize, ToSchema)]
pub struct DuelMoveSummary {
    /// Participant who played.
    pub participant_id: i64,
    /// The hand they played.
    #[serde(rename = "move")]
    pub hand: DuelMove,
}

/// How a resolved duel ended.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DuelOutcomeKind {
    /// Both hands were equal.
    Draw,
    /// One participant won.
    Winner,
}

/// Resolution of a duel, present only once both moves are in.
#[derive(Debug, Serialize, ToSchema)]
pub struct DuelResult {
    /// Draw or winner.
    pub outcome: DuelOutcomeKind,
    /// Winning participant when the outcome is not a draw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<i64>,
}

/// Snapshot of a session's duel.
#[derive(Debug, Serialize, ToSchema)]
pub struct DuelStatusResponse {
    /// Moves recorded so far, in arrival order.
    pub moves: Vec<DuelMoveSummary>,
    /// Resolution, present only once the duel is decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<DuelResult>,
}

impl From<&DuelBoard> for DuelStatusResponse {
    fn from(board: &DuelBoard) -> Self {
        let moves = board
            .moves()
            .iter()
            .map(|(participant_id, hand)| DuelMoveSummary {
                participant_id: *participant_id,
                hand: *hand,
            })
            .collect();

        let result = board.outcome().map(|outcome| match outcome {
            DuelOutcome::Draw => DuelResult {
                outcome: DuelOutcomeKind::Draw,
                winner: None,
            },
            DuelOutcome::Winner(participant_id) => DuelResult {
                outcome: DuelOutcomeKind::Winner,
                winner: Some(participant_id),
            },
        });

        Self { moves, result }
    }
}

impl DuelStatusResponse {
    /// Snapshot of a session with no live duel.
    pub fn empty() -> Self {
        Self {
            moves: Vec::new(),
            result: None,
        }
    }
}
