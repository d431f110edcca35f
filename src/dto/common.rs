use serde::Serialize;
use utoipa::ToSchema;

/// Generic acknowledgement returned by mutating endpoints with no payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct AckResponse {
    /// Always true; failures are reported through the error body instead.
    pub success: bool,
}

impl AckResponse {
    /// Successful acknowledgement.
    pub fn ok() -> Self {
        Self { success: true }
    }
}
