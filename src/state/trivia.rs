//! First-correct-wins trivia round granting the remove-a-movie power.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::TriviaQuestion;

/// The participant who answered first, pinned for the rest of the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TriviaWinner {
    /// Participant identifier.
    pub id: i64,
    /// Nickname at submission time, echoed back to polling clients.
    pub nickname: String,
}

/// Outcome of one answer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// First correct answer: the round is now decided and the caller won.
    Won(TriviaWinner),
    /// Wrong answer; the round stays open for everyone.
    Incorrect,
    /// The round was already decided, correctness notwithstanding.
    AlreadyDecided(TriviaWinner),
}

/// Per-session trivia instance.
///
/// `answered` flips exactly once. After that every submission resolves to
/// [`AnswerOutcome::AlreadyDecided`] no matter how correct it is: the race is
/// first past the post, not most correct.
#[derive(Debug, Clone)]
pub struct TriviaRound {
    question: TriviaQuestion,
    answered: bool,
    winner: Option<TriviaWinner>,
}

impl TriviaRound {
    /// Open a fresh round around the given question.
    pub fn new(question: TriviaQuestion) -> Self {
        Self {
            question,
            answered: false,
            winner: None,
        }
    }

    /// The question being raced on.
    pub fn question(&self) -> &TriviaQuestion {
        &self.question
    }

    /// Whether the round is still open for answers.
    pub fn is_open(&self) -> bool {
        !self.answered
    }

    /// The pinned winner, if the round is decided.
    pub fn winner(&self) -> Option<&TriviaWinner> {
        self.winner.as_ref()
    }

    /// Judge one submission.
    ///
    /// The single state-changing transition is the first correct answer;
    /// everything else leaves the round untouched.
    pub fn submit(&mut self, actor: i64, nickname: &str, answer: &str) -> AnswerOutcome {
        if self.answered {
            let winner = self
                .winner
                .clone()
                .unwrap_or_else(|| TriviaWinner {
                    id: actor,
                    nickname: nickname.to_owned(),
                });
            return AnswerOutcome::AlreadyDecided(winner);
        }

        if !answers_match(answer, &self.question.answer) {
            return AnswerOutcome::Incorrect;
        }

        let winner = TriviaWinner {
            id: actor,
            nickname: nickname.to_owned(),
        };
        self.answered = true;
        self.winner = Some(winner.clone());
        AnswerOutcome::Won(winner)
    }
}

/// Trimmed, case-insensitive comparison so clients that normalize option
/// strings differently still race on the same answer.
fn answers_match(submitted: &str, expected: &str) -> bool {
    submitted.trim().eq_ignore_ascii_case(expected.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> TriviaQuestion {
        TriviaQuestion {
            prompt: "Which movie features the line 'Here's looking at you, kid'?".into(),
            options: vec![
                "Casablanca".into(),
                "Citizen Kane".into(),
                "Gone with the Wind".into(),
            ],
            answer: "Casablanca".into(),
        }
    }

    #[test]
    fn fresh_round_is_open_without_winner() {
        let round = TriviaRound::new(question());
        assert!(round.is_open());
        assert!(round.winner().is_none());
    }

    #[test]
    fn wrong_answer_keeps_round_open() {
        let mut round = TriviaRound::new(question());
        assert_eq!(round.submit(1, "ana", "Citizen Kane"), AnswerOutcome::Incorrect);
        assert!(round.is_open());
        assert!(round.winner().is_none());
    }

    #[test]
    fn first_correct_answer_wins() {
        let mut round = TriviaRound::new(question());
        assert_eq!(round.submit(1, "ana", "Citizen Kane"), AnswerOutcome::Incorrect);

        let outcome = round.submit(2, "ben", "Casablanca");
        let AnswerOutcome::Won(winner) = outcome else {
            panic!("expected a win, got {outcome:?}");
        };
        assert_eq!(winner.id, 2);
        assert_eq!(winner.nickname, "ben");
        assert!(!round.is_open());
    }

    #[test]
    fn later_correct_answer_loses_and_winner_is_unchanged() {
        let mut round = TriviaRound::new(question());
        round.submit(2, "ben", "Casablanca");

        let outcome = round.submit(3, "cam", "Casablanca");
        let AnswerOutcome::AlreadyDecided(winner) = outcome else {
            panic!("expected already-decided, got {outcome:?}");
        };
        assert_eq!(winner.id, 2);
        assert_eq!(round.winner().map(|w| w.id), Some(2));
    }

    #[test]
    fn same_actor_cannot_rewin_a_decided_round() {
        let mut round = TriviaRound::new(question());
        round.submit(2, "ben", "Casablanca");
        let outcome = round.submit(2, "ben", "Casablanca");
        assert!(matches!(outcome, AnswerOutcome::AlreadyDecided(_)));
    }

    #[test]
    fn matching_ignores_case_and_whitespace() {
        assert!(answers_match("  casablanca ", "Casablanca"));
        assert!(answers_match("CASABLANCA", "Casablanca"));
        assert!(!answers_match("Casablanc", "Casablanca"));
    }
}
