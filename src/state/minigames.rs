//! Session-keyed storage for ephemeral mini-game instances.
//!
//! Duel and trivia state is process memory only: a restart is an implicit
//! reset for every session. The store is injected through [`MiniGameStore`]
//! rather than a module-level map so tests get an isolated instance and a
//! shared backend can be swapped in if the service ever scales out.

use dashmap::DashMap;

/// Keyed access to at most one live mini-game instance per session.
///
/// Callers that read-modify-write an instance (`get` then `set`) must hold
/// the matching gate in [`crate::state::AppState`]; the store itself only
/// guarantees per-call consistency.
pub trait MiniGameStore<T>: Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    /// The live instance for the session, if any.
    fn get(&self, session_id: i64) -> Option<T>;
    /// Install or replace the live instance for the session.
    fn set(&self, session_id: i64, value: T);
    /// Discard the live instance for the session, if any.
    fn remove(&self, session_id: i64);
}

/// In-memory [`MiniGameStore`] backed by a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryMiniGames<T> {
    slots: DashMap<i64, T>,
}

impl<T> InMemoryMiniGames<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }
}

impl<T> MiniGameStore<T> for InMemoryMiniGames<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn get(&self, session_id: i64) -> Option<T> {
        self.slots.get(&session_id).map(|slot| slot.value().clone())
    }

    fn set(&self, session_id: i64, value: T) {
        self.slots.insert(session_id, value);
    }

    fn remove(&self, session_id: i64) {
        self.slots.remove(&session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_are_isolated() {
        let store = InMemoryMiniGames::new();
        store.set(1, "a");
        store.set(2, "b");
        assert_eq!(store.get(1), Some("a"));
        assert_eq!(store.get(2), Some("b"));
        assert_eq!(store.get(3), None);
    }

    #[test]
    fn set_replaces_and_remove_clears() {
        let store = InMemoryMiniGames::new();
        store.set(1, "a");
        store.set(1, "b");
        assert_eq!(store.get(1), Some("b"));
        store.remove(1);
        assert_eq!(store.get(1), None);
        // Removing an absent slot is harmless.
        store.remove(1);
    }
}
