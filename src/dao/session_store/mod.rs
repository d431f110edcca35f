pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use futures::future::BoxFuture;

use crate::dao::{
    models::{
        CatalogFilter, HistoryEntryEntity, MovieEntity, ParticipantEntity, SessionEntity,
        ShortlistEntryEntity, VoteEntity,
    },
    storage::StorageResult,
};

/// Abstraction over the persistence layer for sessions, participants, the
/// shared list, votes, the movie catalog, and watch history.
///
/// Mini-game state is deliberately absent: duels and trivia rounds are
/// process-memory only and live behind [`crate::state::MiniGameStore`].
pub trait SessionStore: Send + Sync {
    /// Persist a freshly created session.
    fn create_session(&self, session: SessionEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Look a session up by its join code.
    fn find_session_by_code(
        &self,
        code: String,
    ) -> BoxFuture<'static, StorageResult<Option<SessionEntity>>>;
    /// Look a session up by its numeric id.
    fn find_session(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<SessionEntity>>>;
    /// Update the public flag; returns false when the session does not exist.
    fn set_session_visibility(
        &self,
        id: i64,
        is_public: bool,
    ) -> BoxFuture<'static, StorageResult<bool>>;

    /// Persist a participant joining a session.
    fn add_participant(
        &self,
        participant: ParticipantEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// All participants of a session in join order.
    fn list_participants(
        &self,
        session_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>>;

    /// Add a shortlist entry unless the (session, movie) pair already exists.
    /// Re-adding is an idempotent no-op.
    fn add_shortlist_entry(
        &self,
        entry: ShortlistEntryEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// All shortlist entries of a session.
    fn list_shortlist(
        &self,
        session_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<ShortlistEntryEntity>>>;
    /// Delete a shortlist entry; returns whether an entry was removed.
    fn remove_shortlist_entry(
        &self,
        session_id: i64,
        movie_id: i64,
    ) -> BoxFuture<'static, StorageResult<bool>>;

    /// Insert or replace the vote for the exact (session, movie, participant)
    /// triple. Last write wins; votes never accumulate per participant.
    fn upsert_vote(&self, vote: VoteEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// All votes cast in a session.
    fn list_votes(&self, session_id: i64) -> BoxFuture<'static, StorageResult<Vec<VoteEntity>>>;
    /// All votes cast on one movie of a session.
    fn list_votes_for_movie(
        &self,
        session_id: i64,
        movie_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<VoteEntity>>>;
    /// Delete every vote on one movie of a session.
    fn delete_votes_for_movie(
        &self,
        session_id: i64,
        movie_id: i64,
    ) -> BoxFuture<'static, StorageResult<()>>;

    /// Catalog movies matching the given filter, in unspecified order.
    fn query_movies(
        &self,
        filter: CatalogFilter,
    ) -> BoxFuture<'static, StorageResult<Vec<MovieEntity>>>;
    /// The `limit` best-rated catalog movies, used as the recommendation
    /// fallback when a filter matches nothing.
    fn top_rated_movies(&self, limit: usize)
    -> BoxFuture<'static, StorageResult<Vec<MovieEntity>>>;

    /// Record a watched movie for a session.
    fn add_history_entry(
        &self,
        entry: HistoryEntryEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Watch history of a session, newest first.
    fn list_history(
        &self,
        session_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<HistoryEntryEntity>>>;

    /// Cheap connectivity probe used by the health endpoint and supervisor.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to re-establish the backend connection after a failed probe.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
