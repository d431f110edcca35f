use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    config::TriviaQuestion,
    state::trivia::{TriviaRound, TriviaWinner},
};

/// Question projection sent to clients. The correct answer stays server-side.
#[derive(Debug, Serialize, ToSchema)]
pub struct TriviaQuestionView {
    /// Question text.
    pub prompt: String,
    /// Options in display order.
    pub options: Vec<String>,
}

impl From<&TriviaQuestion> for TriviaQuestionView {
    fn from(question: &TriviaQuestion) -> Self {
        Self {
            prompt: question.prompt.clone(),
            options: question.options.clone(),
        }
    }
}

/// Snapshot of a session's trivia round used by polling clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct TriviaStatusResponse {
    /// True while a round is open for answers.
    pub active: bool,
    /// The question being raced on, present while a round exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<TriviaQuestionView>,
    /// The winner, present once the round is decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<TriviaWinner>,
}

impl TriviaStatusResponse {
    /// Snapshot of a session with no live round.
    pub fn inactive() -> Self {
        Self {
            active: false,
            question: None,
            winner: None,
        }
    }
}

impl From<&TriviaRound> for TriviaStatusResponse {
    fn from(round: &TriviaRound) -> Self {
        Self {
            active: round.is_open(),
            question: Some(round.question().into()),
            winner: round.winner().cloned(),
        }
    }
}

/// Request submitting a trivia answer.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TriviaAnswerRequest {
    /// Participant answering.
    pub participant_id: i64,
    /// Nickname echoed back to other pollers if this answer wins.
    pub nickname: String,
    /// The submitted option.
    pub answer: String,
}

/// Typed result of an answer submission. Losing outcomes ("incorrect answer",
/// "round already decided") are part of the normal flow, so they travel in
/// this body rather than as HTTP errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct TriviaAnswerResponse {
    /// True only for the single winning submission of a round.
    pub success: bool,
    /// The round winner; set on the winning response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<TriviaWinner>,
    /// Reason the submission lost, when it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
