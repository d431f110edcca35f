//! [`SessionStore`] implementation on top of the MongoDB driver.

use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{Document, doc},
    options::IndexOptions,
};
use tokio::sync::RwLock;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{
        HistoryDocument, ParticipantDocument, SessionDocument, ShortlistDocument, filter_to_query,
    },
};
use crate::dao::{
    models::{
        CatalogFilter, HistoryEntryEntity, MovieEntity, ParticipantEntity, SessionEntity,
        ShortlistEntryEntity, VoteEntity,
    },
    session_store::SessionStore,
    storage::StorageResult,
};

const SESSION_COLLECTION: &str = "sessions";
const PARTICIPANT_COLLECTION: &str = "participants";
const SHORTLIST_COLLECTION: &str = "shared_list";
const VOTE_COLLECTION: &str = "votes";
const MOVIE_COLLECTION: &str = "movies";
const HISTORY_COLLECTION: &str = "history";

/// MongoDB-backed session store sharing one client across clones.
#[derive(Clone)]
pub struct MongoSessionStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoSessionStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        let unique = |name: &str| {
            IndexOptions::builder()
                .name(Some(name.to_owned()))
                .unique(Some(true))
                .build()
        };
        let plain = |name: &str| IndexOptions::builder().name(Some(name.to_owned())).build();

        let indexes: [(&'static str, &'static str, IndexModel); 5] = [
            (
                SESSION_COLLECTION,
                "code",
                IndexModel::builder()
                    .keys(doc! { "code": 1 })
                    .options(unique("session_code_idx"))
                    .build(),
            ),
            (
                PARTICIPANT_COLLECTION,
                "session_id",
                IndexModel::builder()
                    .keys(doc! { "session_id": 1 })
                    .options(plain("participant_session_idx"))
                    .build(),
            ),
            (
                SHORTLIST_COLLECTION,
                "session_id,movie_id",
                IndexModel::builder()
                    .keys(doc! { "session_id": 1, "movie_id": 1 })
                    .options(unique("shortlist_session_movie_idx"))
                    .build(),
            ),
            (
                VOTE_COLLECTION,
                "session_id,movie_id,participant_id",
                IndexModel::builder()
                    .keys(doc! { "session_id": 1, "movie_id": 1, "participant_id": 1 })
                    .options(unique("vote_triple_idx"))
                    .build(),
            ),
            (
                HISTORY_COLLECTION,
                "session_id",
                IndexModel::builder()
                    .keys(doc! { "session_id": 1 })
                    .options(plain("history_session_idx"))
                    .build(),
            ),
        ];

        for (collection_name, index, model) in indexes {
            database
                .collection::<Document>(collection_name)
                .create_index(model)
                .await
                .map_err(|source| MongoDaoError::EnsureIndex {
                    collection: collection_name,
                    index,
                    source,
                })?;
        }

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn sessions(&self) -> Collection<SessionDocument> {
        self.database().await.collection(SESSION_COLLECTION)
    }

    async fn participants(&self) -> Collection<ParticipantDocument> {
        self.database().await.collection(PARTICIPANT_COLLECTION)
    }

    async fn shortlist(&self) -> Collection<ShortlistDocument> {
        self.database().await.collection(SHORTLIST_COLLECTION)
    }

    async fn votes(&self) -> Collection<VoteEntity> {
        self.database().await.collection(VOTE_COLLECTION)
    }

    async fn movies(&self) -> Collection<MovieEntity> {
        self.database().await.collection(MOVIE_COLLECTION)
    }

    async fn history(&self) -> Collection<HistoryDocument> {
        self.database().await.collection(HISTORY_COLLECTION)
    }

    async fn create_session(&self, session: SessionEntity) -> MongoResult<()> {
        let id = session.id;
        let document: SessionDocument = session.into();
        self.sessions()
            .await
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::SaveSession { id, source })?;
        Ok(())
    }

    async fn find_session_by_code(&self, code: &str) -> MongoResult<Option<SessionEntity>> {
        let document = self
            .sessions()
            .await
            .find_one(doc! { "code": code })
            .await
            .map_err(|source| MongoDaoError::LoadSession { source })?;
        Ok(document.map(Into::into))
    }

    async fn find_session(&self, id: i64) -> MongoResult<Option<SessionEntity>> {
        let document = self
            .sessions()
            .await
            .find_one(doc! { "_id": id })
            .await
            .map_err(|source| MongoDaoError::LoadSession { source })?;
        Ok(document.map(Into::into))
    }

    async fn set_session_visibility(&self, id: i64, is_public: bool) -> MongoResult<bool> {
        let result = self
            .sessions()
            .await
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "is_public": is_public } },
            )
            .await
            .map_err(|source| MongoDaoError::SaveSession { id, source })?;
        Ok(result.matched_count > 0)
    }

    async fn add_participant(&self, participant: ParticipantEntity) -> MongoResult<()> {
        let id = participant.id;
        let document: ParticipantDocument = participant.into();
        self.participants()
            .await
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::SaveParticipant { id, source })?;
        Ok(())
    }

    async fn list_participants(&self, session_id: i64) -> MongoResult<Vec<ParticipantEntity>> {
        let documents: Vec<ParticipantDocument> = self
            .participants()
            .await
            .find(doc! { "session_id": session_id })
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(|source| MongoDaoError::ListParticipants { session_id, source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListParticipants { session_id, source })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn add_shortlist_entry(&self, entry: ShortlistEntryEntity) -> MongoResult<()> {
        let session_id = entry.session_id;
        let movie_id = entry.movie_id;
        let document: ShortlistDocument = entry.into();
        let payload = mongodb::bson::serialize_to_document(&document)
            .map_err(|source| MongoDaoError::UpdateShortlist {
                session_id,
                source: mongodb::error::Error::from(source),
            })?;

        // $setOnInsert keeps the original entry when the pair already exists,
        // which is exactly the idempotent-add contract.
        self.shortlist()
            .await
            .update_one(
                doc! { "session_id": session_id, "movie_id": movie_id },
                doc! { "$setOnInsert": payload },
            )
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::UpdateShortlist { session_id, source })?;
        Ok(())
    }

    async fn list_shortlist(&self, session_id: i64) -> MongoResult<Vec<ShortlistEntryEntity>> {
        let documents: Vec<ShortlistDocument> = self
            .shortlist()
            .await
            .find(doc! { "session_id": session_id })
            .await
            .map_err(|source| MongoDaoError::ListShortlist { session_id, source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListShortlist { session_id, source })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn remove_shortlist_entry(&self, session_id: i64, movie_id: i64) -> MongoResult<bool> {
        let result = self
            .shortlist()
            .await
            .delete_one(doc! { "session_id": session_id, "movie_id": movie_id })
            .await
            .map_err(|source| MongoDaoError::UpdateShortlist { session_id, source })?;
        Ok(result.deleted_count > 0)
    }

    async fn upsert_vote(&self, vote: VoteEntity) -> MongoResult<()> {
        let session_id = vote.session_id;
        self.votes()
            .await
            .update_one(
                doc! {
                    "session_id": vote.session_id,
                    "movie_id": vote.movie_id,
                    "participant_id": vote.participant_id,
                },
                doc! { "$set": { "value": i32::from(i8::from(vote.value)) } },
            )
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::UpdateVotes { session_id, source })?;
        Ok(())
    }

    async fn list_votes(&self, session_id: i64) -> MongoResult<Vec<VoteEntity>> {
        self.votes()
            .await
            .find(doc! { "session_id": session_id })
            .await
            .map_err(|source| MongoDaoError::ListVotes { session_id, source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListVotes { session_id, source })
    }

    async fn list_votes_for_movie(
        &self,
        session_id: i64,
        movie_id: i64,
    ) -> MongoResult<Vec<VoteEntity>> {
        self.votes()
            .await
            .find(doc! { "session_id": session_id, "movie_id": movie_id })
            .await
            .map_err(|source| MongoDaoError::ListVotes { session_id, source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListVotes { session_id, source })
    }

    async fn delete_votes_for_movie(&self, session_id: i64, movie_id: i64) -> MongoResult<()> {
        self.votes()
            .await
            .delete_many(doc! { "session_id": session_id, "movie_id": movie_id })
            .await
            .map_err(|source| MongoDaoError::UpdateVotes { session_id, source })?;
        Ok(())
    }

    async fn query_movies(&self, filter: CatalogFilter) -> MongoResult<Vec<MovieEntity>> {
        self.movies()
            .await
            .find(filter_to_query(&filter))
            .await
            .map_err(|source| MongoDaoError::QueryMovies { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::QueryMovies { source })
    }

    async fn top_rated_movies(&self, limit: usize) -> MongoResult<Vec<MovieEntity>> {
        self.movies()
            .await
            .find(doc! {})
            .sort(doc! { "rating": -1 })
            .limit(limit as i64)
            .await
            .map_err(|source| MongoDaoError::QueryMovies { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::QueryMovies { source })
    }

    async fn add_history_entry(&self, entry: HistoryEntryEntity) -> MongoResult<()> {
        let session_id = entry.session_id;
        let document: HistoryDocument = entry.into();
        self.history()
            .await
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::UpdateHistory { session_id, source })?;
        Ok(())
    }

    async fn list_history(&self, session_id: i64) -> MongoResult<Vec<HistoryEntryEntity>> {
        let documents: Vec<HistoryDocument> = self
            .history()
            .await
            .find(doc! { "session_id": session_id })
            .sort(doc! { "watched_on": -1 })
            .await
            .map_err(|source| MongoDaoError::ListHistory { session_id, source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListHistory { session_id, source })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }
}

impl SessionStore for MongoSessionStore {
    fn create_session(&self, session: SessionEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.create_session(session).await.map_err(Into::into) })
    }

    fn find_session_by_code(
        &self,
        code: String,
    ) -> BoxFuture<'static, StorageResult<Option<SessionEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_session_by_code(&code).await.map_err(Into::into) })
    }

    fn find_session(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<SessionEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_session(id).await.map_err(Into::into) })
    }

    fn set_session_visibility(
        &self,
        id: i64,
        is_public: bool,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .set_session_visibility(id, is_public)
                .await
                .map_err(Into::into)
        })
    }

    fn add_participant(
        &self,
        participant: ParticipantEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.add_participant(participant).await.map_err(Into::into) })
    }

    fn list_participants(
        &self,
        session_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_participants(session_id).await.map_err(Into::into) })
    }

    fn add_shortlist_entry(
        &self,
        entry: ShortlistEntryEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.add_shortlist_entry(entry).await.map_err(Into::into) })
    }

    fn list_shortlist(
        &self,
        session_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<ShortlistEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_shortlist(session_id).await.map_err(Into::into) })
    }

    fn remove_shortlist_entry(
        &self,
        session_id: i64,
        movie_id: i64,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .remove_shortlist_entry(session_id, movie_id)
                .await
                .map_err(Into::into)
        })
    }

    fn upsert_vote(&self, vote: VoteEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.upsert_vote(vote).await.map_err(Into::into) })
    }

    fn list_votes(&self, session_id: i64) -> BoxFuture<'static, StorageResult<Vec<VoteEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_votes(session_id).await.map_err(Into::into) })
    }

    fn list_votes_for_movie(
        &self,
        session_id: i64,
        movie_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<VoteEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .list_votes_for_movie(session_id, movie_id)
                .await
                .map_err(Into::into)
        })
    }

    fn delete_votes_for_movie(
        &self,
        session_id: i64,
        movie_id: i64,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .delete_votes_for_movie(session_id, movie_id)
                .await
                .map_err(Into::into)
        })
    }

    fn query_movies(
        &self,
        filter: CatalogFilter,
    ) -> BoxFuture<'static, StorageResult<Vec<MovieEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.query_movies(filter).await.map_err(Into::into) })
    }

    fn top_rated_movies(
        &self,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<MovieEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.top_rated_movies(limit).await.map_err(Into::into) })
    }

    fn add_history_entry(
        &self,
        entry: HistoryEntryEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.add_history_entry(entry).await.map_err(Into::into) })
    }

    fn list_history(
        &self,
        session_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<HistoryEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_history(session_id).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
