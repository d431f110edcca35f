use mongodb::error::Error as MongoError;
use thiserror::Error;

/// Result alias for MongoDB DAO operations.
pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Errors raised by the MongoDB backend, one variant per operation so log
/// lines identify what failed without parsing driver errors.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum MongoDaoError {
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        uri: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        attempts: u32,
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        source: MongoError,
    },
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        collection: &'static str,
        index: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("failed to save session `{id}`")]
    SaveSession {
        id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to load session")]
    LoadSession {
        #[source]
        source: MongoError,
    },
    #[error("failed to save participant `{id}`")]
    SaveParticipant {
        id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to list participants of session `{session_id}`")]
    ListParticipants {
        session_id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to update shared list of session `{session_id}`")]
    UpdateShortlist {
        session_id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to list shared list of session `{session_id}`")]
    ListShortlist {
        session_id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to update votes of session `{session_id}`")]
    UpdateVotes {
        session_id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to list votes of session `{session_id}`")]
    ListVotes {
        session_id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to query the movie catalog")]
    QueryMovies {
        #[source]
        source: MongoError,
    },
    #[error("failed to update history of session `{session_id}`")]
    UpdateHistory {
        session_id: i64,
        #[source]
        source: MongoError,
    },
    #[error("failed to list history of session `{session_id}`")]
    ListHistory {
        session_id: i64,
        #[source]
        source: MongoError,
    },
}
