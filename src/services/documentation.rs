use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for ReelSync Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::session::create_session,
        crate::routes::session::get_session_by_code,
        crate::routes::session::get_session_by_id,
        crate::routes::session::set_visibility,
        crate::routes::session::join_session,
        crate::routes::session::get_participants,
        crate::routes::list::add_entry,
        crate::routes::list::get_shared_list,
        crate::routes::list::cast_vote,
        crate::routes::list::finalize,
        crate::routes::list::remove_entry,
        crate::routes::duel::submit_move,
        crate::routes::duel::get_status,
        crate::routes::duel::reset,
        crate::routes::trivia::start,
        crate::routes::trivia::get_status,
        crate::routes::trivia::submit_answer,
        crate::routes::trivia::reset,
        crate::routes::recommend::get_recommendations,
        crate::routes::history::add_entry,
        crate::routes::history::get_history,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::AckResponse,
            crate::dto::session::CreateSessionResponse,
            crate::dto::session::SessionSummary,
            crate::dto::session::VisibilityRequest,
            crate::dto::session::JoinRequest,
            crate::dto::session::ParticipantSummary,
            crate::dto::session::ParticipantsResponse,
            crate::dto::list::AddEntryRequest,
            crate::dto::list::SharedListItem,
            crate::dto::list::SharedListResponse,
            crate::dto::list::VoteRequest,
            crate::dto::list::VoteResponse,
            crate::dto::list::FinalizeResponse,
            crate::dto::duel::DuelMoveRequest,
            crate::dto::duel::DuelStatusResponse,
            crate::dto::trivia::TriviaStatusResponse,
            crate::dto::trivia::TriviaAnswerRequest,
            crate::dto::trivia::TriviaAnswerResponse,
            crate::dto::recommend::RecommendationsResponse,
            crate::dto::history::AddHistoryRequest,
            crate::dto::history::HistoryResponse,
            crate::dao::models::SliderValues,
            crate::state::duel::DuelMove,
            crate::state::trivia::TriviaWinner,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "session", description = "Session lifecycle and participants"),
        (name = "list", description = "Shared list curation and voting"),
        (name = "duel", description = "Rock-paper-scissors tie-break"),
        (name = "trivia", description = "First-correct-wins trivia race"),
        (name = "recommend", description = "Shared recommendations"),
        (name = "history", description = "Watch history"),
    )
)]
pub struct ApiDoc;
