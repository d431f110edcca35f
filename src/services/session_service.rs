//! Session lifecycle: creation with a shareable join code, lookups,
//! visibility, and participant joining.

use std::time::SystemTime;

use rand::Rng;
use tracing::info;

use crate::{
    dao::models::{ParticipantEntity, SessionEntity},
    dto::{
        common::AckResponse,
        session::{
            CreateSessionResponse, JoinRequest, ParticipantSummary, ParticipantsResponse,
            SessionSummary, VisibilityRequest,
        },
    },
    error::ServiceError,
    state::SharedState,
};

const SESSION_CODE_LENGTH: usize = 6;
const SESSION_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
// Collisions over 36^6 codes are rare; a handful of retries is plenty.
const CODE_RETRY_LIMIT: usize = 5;

/// Create a session with a fresh join code. Sessions start private.
pub async fn create_session(state: &SharedState) -> Result<CreateSessionResponse, ServiceError> {
    let store = state.require_session_store().await?;

    let mut code = generate_session_code();
    for _ in 0..CODE_RETRY_LIMIT {
        if store.find_session_by_code(code.clone()).await?.is_none() {
            break;
        }
        code = generate_session_code();
    }

    let session = SessionEntity {
        id: generate_id(),
        code: code.clone(),
        is_public: false,
        created_at: SystemTime::now(),
    };
    store.create_session(session.clone()).await?;

    info!(session_id = session.id, code = %session.code, "session created");

    Ok(CreateSessionResponse {
        id: session.id,
        code,
    })
}

/// Look a session up by its join code.
pub async fn session_by_code(
    state: &SharedState,
    code: &str,
) -> Result<SessionSummary, ServiceError> {
    let store = state.require_session_store().await?;
    let session = store
        .find_session_by_code(code.to_ascii_uppercase())
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("session with code `{code}` not found")))?;
    Ok(session.into())
}

/// Look a session up by its numeric id.
pub async fn session_by_id(state: &SharedState, id: i64) -> Result<SessionSummary, ServiceError> {
    let store = state.require_session_store().await?;
    let session = store
        .find_session(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("session `{id}` not found")))?;
    Ok(session.into())
}

/// Toggle a session's public flag.
pub async fn set_visibility(
    state: &SharedState,
    id: i64,
    request: VisibilityRequest,
) -> Result<AckResponse, ServiceError> {
    let store = state.require_session_store().await?;
    let updated = store.set_session_visibility(id, request.is_public).await?;
    if !updated {
        return Err(ServiceError::NotFound(format!("session `{id}` not found")));
    }
    Ok(AckResponse::ok())
}

/// Join a session as a new participant. The preference vector is captured
/// once here and never edited afterwards.
pub async fn join(
    state: &SharedState,
    session_id: i64,
    request: JoinRequest,
) -> Result<ParticipantSummary, ServiceError> {
    let store = state.require_session_store().await?;

    if store.find_session(session_id).await?.is_none() {
        return Err(ServiceError::NotFound(format!(
            "session `{session_id}` not found"
        )));
    }

    let participant = ParticipantEntity {
        id: generate_id(),
        session_id,
        nickname: request.nickname,
        sliders: request.sliders,
        created_at: SystemTime::now(),
    };
    store.add_participant(participant.clone()).await?;

    info!(
        session_id,
        participant_id = participant.id,
        nickname = %participant.nickname,
        "participant joined"
    );

    Ok(participant.into())
}

/// List a session's participants in join order.
pub async fn participants(
    state: &SharedState,
    session_id: i64,
) -> Result<ParticipantsResponse, ServiceError> {
    let store = state.require_session_store().await?;
    let participants = store
        .list_participants(session_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(ParticipantsResponse { participants })
}

/// Random six-character uppercase base-36 join code.
fn generate_session_code() -> String {
    let mut rng = rand::rng();
    (0..SESSION_CODE_LENGTH)
        .map(|_| {
            let index = rng.random_range(0..SESSION_CODE_CHARSET.len());
            SESSION_CODE_CHARSET[index] as char
        })
        .collect()
}

/// Random positive identifier. The coordination core allocates its own keys
/// instead of depending on the store to hand them out.
fn generate_id() -> i64 {
    rand::rng().random_range(1..i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_codes_use_the_expected_alphabet() {
        for _ in 0..50 {
            let code = generate_session_code();
            assert_eq!(code.len(), SESSION_CODE_LENGTH);
            assert!(
                code.bytes().all(|b| SESSION_CODE_CHARSET.contains(&b)),
                "unexpected character in code {code}"
            );
        }
    }

    #[test]
    fn generated_ids_are_positive() {
        for _ in 0..50 {
            assert!(generate_id() > 0);
        }
    }
}
