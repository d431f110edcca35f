//! Rock-paper-scissors duel board used to break shortlist ties.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Number of seats on a duel board. Strictly two; a third actor is rejected
/// until the board is reset.
pub const DUEL_SEATS: usize = 2;

/// A rock-paper-scissors hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DuelMove {
    /// Beats scissors.
    Rock,
    /// Beats rock.
    Paper,
    /// Beats paper.
    Scissors,
}

impl DuelMove {
    /// Standard beats-relation: rock>scissors, scissors>paper, paper>rock.
    pub fn beats(self, other: DuelMove) -> bool {
        matches!(
            (self, other),
            (DuelMove::Rock, DuelMove::Scissors)
                | (DuelMove::Scissors, DuelMove::Paper)
                | (DuelMove::Paper, DuelMove::Rock)
        )
    }
}

/// Why a move submission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DuelMoveError {
    /// The actor already has a recorded move in this instance.
    #[error("actor already played in this duel")]
    AlreadyPlayed,
    /// Two other actors already occupy the board.
    #[error("duel already has two players")]
    BoardFull,
}

/// Outcome of a resolved duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelOutcome {
    /// Both actors played the same hand.
    Draw,
    /// The identified actor won.
    Winner(i64),
}

/// Per-session duel instance: up to two write-once moves in arrival order.
///
/// The outcome is never stored; it is a pure function of the two moves,
/// recomputed on every status read.
#[derive(Debug, Clone, Default)]
pub struct DuelBoard {
    moves: IndexMap<i64, DuelMove>,
}

impl DuelBoard {
    /// Fresh board with no moves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move for `actor`. Write-once per actor; at most two actors.
    pub fn submit(&mut self, actor: i64, hand: DuelMove) -> Result<(), DuelMoveError> {
        if self.moves.contains_key(&actor) {
            return Err(DuelMoveError::AlreadyPlayed);
        }
        if self.moves.len() >= DUEL_SEATS {
            return Err(DuelMoveError::BoardFull);
        }
        self.moves.insert(actor, hand);
        Ok(())
    }

    /// Moves recorded so far, in arrival order.
    pub fn moves(&self) -> &IndexMap<i64, DuelMove> {
        &self.moves
    }

    /// Resolve the board once both seats are taken; `None` while waiting.
    pub fn outcome(&self) -> Option<DuelOutcome> {
        if self.moves.len() < DUEL_SEATS {
            return None;
        }

        let (first_actor, first_move) = self
            .moves
            .get_index(0)
            .map(|(actor, hand)| (*actor, *hand))?;
        let (second_actor, second_move) = self
            .moves
            .get_index(1)
            .map(|(actor, hand)| (*actor, *hand))?;

        let outcome = if first_move == second_move {
            DuelOutcome::Draw
        } else if first_move.beats(second_move) {
            DuelOutcome::Winner(first_actor)
        } else {
            DuelOutcome::Winner(second_actor)
        };

        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_no_outcome() {
        let board = DuelBoard::new();
        assert!(board.outcome().is_none());
        assert!(board.moves().is_empty());
    }

    #[test]
    fn one_move_is_not_resolvable() {
        let mut board = DuelBoard::new();
        board.submit(1, DuelMove::Rock).unwrap();
        assert!(board.outcome().is_none());
    }

    #[test]
    fn rock_beats_scissors() {
        let mut board = DuelBoard::new();
        board.submit(1, DuelMove::Rock).unwrap();
        board.submit(2, DuelMove::Scissors).unwrap();
        assert_eq!(board.outcome(), Some(DuelOutcome::Winner(1)));
    }

    #[test]
    fn second_mover_can_win() {
        let mut board = DuelBoard::new();
        board.submit(1, DuelMove::Paper).unwrap();
        board.submit(2, DuelMove::Scissors).unwrap();
        assert_eq!(board.outcome(), Some(DuelOutcome::Winner(2)));
    }

    #[test]
    fn equal_moves_draw() {
        let mut board = DuelBoard::new();
        board.submit(1, DuelMove::Rock).unwrap();
        board.submit(2, DuelMove::Rock).unwrap();
        assert_eq!(board.outcome(), Some(DuelOutcome::Draw));
    }

    #[test]
    fn moves_are_write_once_per_actor() {
        let mut board = DuelBoard::new();
        board.submit(1, DuelMove::Rock).unwrap();
        assert_eq!(
            board.submit(1, DuelMove::Paper),
            Err(DuelMoveError::AlreadyPlayed)
        );
        // The original move survives the rejected overwrite.
        assert_eq!(board.moves().get(&1), Some(&DuelMove::Rock));
    }

    #[test]
    fn third_actor_is_rejected() {
        let mut board = DuelBoard::new();
        board.submit(1, DuelMove::Rock).unwrap();
        board.submit(2, DuelMove::Paper).unwrap();
        assert_eq!(
            board.submit(3, DuelMove::Scissors),
            Err(DuelMoveError::BoardFull)
        );
        assert_eq!(board.outcome(), Some(DuelOutcome::Winner(2)));
    }

    #[test]
    fn beats_relation_is_a_cycle() {
        assert!(DuelMove::Rock.beats(DuelMove::Scissors));
        assert!(DuelMove::Scissors.beats(DuelMove::Paper));
        assert!(DuelMove::Paper.beats(DuelMove::Rock));
        assert!(!DuelMove::Rock.beats(DuelMove::Paper));
        assert!(!DuelMove::Rock.beats(DuelMove::Rock));
    }
}
