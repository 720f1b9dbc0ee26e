// src/core/store.rs — In-memory session registry

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::core::session::Session;

/// Holds every live session behind a per-session lock.
///
/// The outer `RwLock` only guards the map itself; turn processing
/// locks the inner `Mutex`, so slow backend calls in one session never
/// block lookups or turns in another. The inner mutex is tokio's fair
/// mutex, which gives concurrent submitters of the same session a
/// first-come first-served order.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the session for `id`, creating it on first use. Callers
    /// racing on a fresh id all receive the same `Arc`.
    pub async fn get_or_create(&self, id: &str) -> Arc<Mutex<Session>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(id) {
                return Arc::clone(session);
            }
        }
        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Session::new(id)))),
        )
    }

    /// Fetch without creating.
    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(id).map(Arc::clone)
    }

    /// Empty a session's history and images. The id stays valid, so
    /// in-flight handles keep working against the cleared state.
    pub async fn clear(&self, id: &str) {
        let session = self.get(id).await;
        if let Some(session) = session {
            session.lock().await.reset();
        }
    }

    /// Drop a session entirely. Returns false if the id was unknown.
    pub async fn destroy(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Stable listing for the sessions endpoint and the REPL.
    pub async fn session_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── Lookup ─────────────────────────────────────────────────

    #[tokio::test]
    async fn test_get_or_create_returns_same_session() {
        let store = SessionStore::new();
        let a = store.get_or_create("s1").await;
        let b = store.get_or_create("s1").await;
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_get_does_not_create() {
        let store = SessionStore::new();
        assert!(store.get("nope").await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.get_or_create("a").await;
        let b = store.get_or_create("b").await;
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(store.len().await, 2);
    }

    // ─── Clear and destroy ──────────────────────────────────────

    #[tokio::test]
    async fn test_clear_keeps_session_alive() {
        let store = SessionStore::new();
        let handle = store.get_or_create("s1").await;
        handle
            .lock()
            .await
            .push_turn(crate::core::session::Turn::user("hi"));
        store.clear("s1").await;
        assert!(handle.lock().await.turns.is_empty());
        // Same Arc still registered under the id.
        let again = store.get_or_create("s1").await;
        assert!(Arc::ptr_eq(&handle, &again));
    }

    #[tokio::test]
    async fn test_clear_unknown_id_is_noop() {
        let store = SessionStore::new();
        store.clear("ghost").await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_destroy_then_recreate_is_fresh() {
        let store = SessionStore::new();
        let old = store.get_or_create("s1").await;
        assert!(store.destroy("s1").await);
        assert!(!store.destroy("s1").await);
        let new = store.get_or_create("s1").await;
        assert!(!Arc::ptr_eq(&old, &new));
    }

    #[tokio::test]
    async fn test_session_ids_sorted() {
        let store = SessionStore::new();
        store.get_or_create("zeta").await;
        store.get_or_create("alpha").await;
        store.get_or_create("mid").await;
        assert_eq!(store.session_ids().await, vec!["alpha", "mid", "zeta"]);
    }
}
