/// Rock-paper-scissors duel board.
pub mod duel;
/// Session-keyed mini-game instance storage.
pub mod minigames;
/// First-correct-wins trivia round.
pub mod trivia;

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, watch};

use crate::{
    config::AppConfig,
    dao::session_store::SessionStore,
    error::ServiceError,
    state::{duel::DuelBoard, minigames::InMemoryMiniGames, trivia::TriviaRound},
};

pub use self::minigames::MiniGameStore;

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state: the persistent store slot, the degraded-mode
/// flag, the per-session mini-game stores, and the gates that serialize
/// mutations of coordination state.
pub struct AppState {
    session_store: RwLock<Option<Arc<dyn SessionStore>>>,
    degraded: watch::Sender<bool>,
    duels: Arc<dyn MiniGameStore<DuelBoard>>,
    trivia: Arc<dyn MiniGameStore<TriviaRound>>,
    // One gate per coordination concern. Holding the gate across the whole
    // logical operation (including store I/O) is what makes cast-vote's
    // write+recount+evict and trivia's check+pin behave as single steps.
    vote_gate: Mutex<()>,
    duel_gate: Mutex<()>,
    trivia_gate: Mutex<()>,
    config: AppConfig,
}

impl AppState {
    /// Construct the state with in-memory mini-game stores, wrapped in an
    /// [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is
    /// installed by the supervisor.
    pub fn new(config: AppConfig) -> SharedState {
        Self::with_minigame_stores(
            config,
            Arc::new(InMemoryMiniGames::new()),
            Arc::new(InMemoryMiniGames::new()),
        )
    }

    /// Construct the state with injected mini-game stores.
    pub fn with_minigame_stores(
        config: AppConfig,
        duels: Arc<dyn MiniGameStore<DuelBoard>>,
        trivia: Arc<dyn MiniGameStore<TriviaRound>>,
    ) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            session_store: RwLock::new(None),
            degraded: degraded_tx,
            duels,
            trivia,
            vote_gate: Mutex::new(()),
            duel_gate: Mutex::new(()),
            trivia_gate: Mutex::new(()),
            config,
        })
    }

    /// Obtain a handle to the current session store, if one is installed.
    pub async fn session_store(&self) -> Option<Arc<dyn SessionStore>> {
        let guard = self.session_store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the session store or fail with the degraded-mode error.
    pub async fn require_session_store(&self) -> Result<Arc<dyn SessionStore>, ServiceError> {
        self.session_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a storage backend and leave degraded mode.
    pub async fn set_session_store(&self, store: Arc<dyn SessionStore>) {
        {
            let mut guard = self.session_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        let guard = self.session_store.read().await;
        guard.is_none() || *self.degraded.borrow()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub async fn update_degraded(&self, value: bool) {
        if *self.degraded.borrow() == value {
            return;
        }

        let _ = self.degraded.send(value);
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Store holding the per-session duel boards.
    pub fn duels(&self) -> &dyn MiniGameStore<DuelBoard> {
        self.duels.as_ref()
    }

    /// Store holding the per-session trivia rounds.
    pub fn trivia(&self) -> &dyn MiniGameStore<TriviaRound> {
        self.trivia.as_ref()
    }

    /// Gate serializing vote casting, finalization, and removals.
    pub fn vote_gate(&self) -> &Mutex<()> {
        &self.vote_gate
    }

    /// Gate serializing duel mutations.
    pub fn duel_gate(&self) -> &Mutex<()> {
        &self.duel_gate
    }

    /// Gate serializing trivia mutations.
    pub fn trivia_gate(&self) -> &Mutex<()> {
        &self.trivia_gate
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
