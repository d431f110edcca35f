use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dao::models::{ParticipantEntity, SessionEntity, SliderValues},
    dto::{
        format_system_time,
        validation::{validate_nickname, validate_sliders},
    },
};

/// Response returned when a session is created.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateSessionResponse {
    /// Numeric session identifier used by all other endpoints.
    pub id: i64,
    /// Join code to share with participants.
    pub code: String,
}

/// Public projection of a session.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionSummary {
    /// Numeric session identifier.
    pub id: i64,
    /// Join code.
    pub code: String,
    /// Whether the session is publicly listed.
    pub is_public: bool,
    /// RFC3339 creation timestamp.
    pub created_at: String,
}

impl From<SessionEntity> for SessionSummary {
    fn from(session: SessionEntity) -> Self {
        Self {
            id: session.id,
            code: session.code,
            is_public: session.is_public,
            created_at: format_system_time(session.created_at),
        }
    }
}

/// Request toggling a session's public flag.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VisibilityRequest {
    /// New value of the public flag.
    pub is_public: bool,
}

/// Payload used to join a session.
#[derive(Debug, Deserialize, ToSchema)]
pub struct JoinRequest {
    /// Display name for the new participant.
    pub nickname: String,
    /// Taste preferences; omitted axes default to the neutral 2.5.
    #[serde(default)]
    pub sliders: SliderValues,
}

impl Validate for JoinRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_nickname(&self.nickname) {
            errors.add("nickname", e);
        }

        if let Err(e) = validate_sliders(&self.sliders) {
            errors.add("sliders", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Public projection of a participant.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantSummary {
    /// Participant identifier, used as the actor id in votes and mini-games.
    pub id: i64,
    /// Session the participant belongs to.
    pub session_id: i64,
    /// Display name.
    pub nickname: String,
    /// Taste preferences captured at join time.
    pub sliders: SliderValues,
    /// RFC3339 join timestamp.
    pub created_at: String,
}

impl From<ParticipantEntity> for ParticipantSummary {
    fn from(participant: ParticipantEntity) -> Self {
        Self {
            id: participant.id,
            session_id: participant.session_id,
            nickname: participant.nickname,
            sliders: participant.sliders,
            created_at: format_system_time(participant.created_at),
        }
    }
}

/// Participants of a session.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantsResponse {
    /// Participants in join order.
    pub participants: Vec<ParticipantSummary>,
}
