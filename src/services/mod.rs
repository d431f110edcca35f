/// OpenAPI documentation generation.
pub mod documentation;
/// Duel (rock-paper-scissors) tie-break coordination.
pub mod duel_service;
/// Health check service.
pub mod health_service;
/// Watch-history records.
pub mod history_service;
/// Shared list curation, voting, and eviction.
pub mod list_service;
/// Recommendation rounds from averaged preferences.
pub mod recommendation_service;
/// Session lifecycle and participants.
pub mod session_service;
/// Storage connection supervision with degraded mode.
pub mod storage_supervisor;
/// Trivia race coordination.
pub mod trivia_service;
