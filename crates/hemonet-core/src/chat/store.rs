//! Bounded, session-scoped conversation-history store.
//!
//! A concurrent map from session id to ordered turns, backed by `DashMap`.
//! Reads clone the turns out immediately -- never hold a `DashMap` guard
//! across an `.await` point. Appends go through the entry API so the
//! read-modify-write for one session is atomic, while distinct sessions
//! proceed in parallel on separate shards.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

use hemonet_types::chat::{SessionContext, Turn};

/// Key of the implicit shared session used when a caller supplies no
/// session id. Concurrent anonymous callers share this one history;
/// callers needing isolation must supply their own id.
pub const ANONYMOUS_SESSION: &str = "anonymous";

/// Concurrent per-session history store with FIFO capacity eviction.
///
/// Cloning produces a shared view of the same underlying data (backed by
/// `Arc`). Histories live until process restart; there is no explicit
/// session destruction, only front-trimming once a session exceeds
/// `max_turns`.
#[derive(Debug, Clone)]
pub struct SessionContextStore {
    inner: Arc<DashMap<String, SessionContext>>,
    max_turns: usize,
}

impl SessionContextStore {
    /// Create an empty store capping each session at `max_turns` turns.
    pub fn new(max_turns: usize) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            max_turns,
        }
    }

    /// Resolve an optional caller-supplied id to a map key.
    ///
    /// Absent or blank ids collapse to [`ANONYMOUS_SESSION`].
    fn resolve_key(session_id: Option<&str>) -> &str {
        match session_id {
            Some(id) if !id.trim().is_empty() => id,
            _ => ANONYMOUS_SESSION,
        }
    }

    /// Cloned turns of a session, oldest first.
    ///
    /// An unseen session is empty history, not an error; the call is
    /// side-effect-free and never creates an entry.
    pub fn get(&self, session_id: Option<&str>) -> Vec<Turn> {
        let key = Self::resolve_key(session_id);
        self.inner
            .get(key)
            .map(|ctx| ctx.turns.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Atomically append one (user, assistant) exchange to a session.
    ///
    /// Both turns land in order, then the front is trimmed until the
    /// session is back within `max_turns`. The entry guard spans the whole
    /// read-modify-write, so two racing appends for the same session can
    /// never lose an update.
    pub fn append(&self, session_id: Option<&str>, user: Turn, assistant: Turn) {
        let key = Self::resolve_key(session_id);
        let mut entry = self
            .inner
            .entry(key.to_string())
            .or_insert_with(|| SessionContext::new(key));

        let ctx = entry.value_mut();
        ctx.turns.push_back(user);
        ctx.turns.push_back(assistant);
        while ctx.turns.len() > self.max_turns {
            ctx.turns.pop_front();
        }
        ctx.last_touched = Utc::now();
    }

    /// Number of turns currently held for a session.
    pub fn turn_count(&self, session_id: Option<&str>) -> usize {
        let key = Self::resolve_key(session_id);
        self.inner.get(key).map(|ctx| ctx.turns.len()).unwrap_or(0)
    }

    /// Number of sessions seen so far.
    pub fn session_count(&self) -> usize {
        self.inner.len()
    }

    /// Whether no session has any history yet.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The configured per-session turn cap.
    pub fn max_turns(&self) -> usize {
        self.max_turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange(n: usize) -> (Turn, Turn) {
        (
            Turn::user(format!("u{n}")),
            Turn::assistant(format!("a{n}")),
        )
    }

    #[test]
    fn test_unseen_session_is_empty() {
        let store = SessionContextStore::new(50);
        assert!(store.get(Some("nope")).is_empty());
        // get never creates an entry
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_then_get_preserves_order() {
        let store = SessionContextStore::new(50);
        let (u, a) = exchange(1);
        store.append(Some("s1"), u.clone(), a.clone());

        let turns = store.get(Some("s1"));
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[turns.len() - 2], u);
        assert_eq!(turns[turns.len() - 1], a);
    }

    #[test]
    fn test_capacity_holds_after_every_append() {
        let store = SessionContextStore::new(6);
        for n in 0..20 {
            let (u, a) = exchange(n);
            store.append(Some("s1"), u, a);
            assert!(store.turn_count(Some("s1")) <= 6);
        }
    }

    #[test]
    fn test_eviction_is_strict_fifo() {
        let store = SessionContextStore::new(2);
        for n in 1..=3 {
            let (u, a) = exchange(n);
            store.append(Some("s1"), u, a);
        }

        let turns = store.get(Some("s1"));
        assert_eq!(turns.len(), 2);
        // Oldest pairs dropped first; only the third exchange survives.
        assert_eq!(turns[0], Turn::user("u3"));
        assert_eq!(turns[1], Turn::assistant("a3"));
    }

    #[test]
    fn test_odd_cap_trims_within_an_exchange() {
        let store = SessionContextStore::new(1);
        let (u, a) = exchange(1);
        store.append(Some("s1"), u, a);

        let turns = store.get(Some("s1"));
        assert_eq!(turns, vec![Turn::assistant("a1")]);
    }

    #[test]
    fn test_zero_cap_keeps_nothing() {
        let store = SessionContextStore::new(0);
        let (u, a) = exchange(1);
        store.append(Some("s1"), u, a);
        assert_eq!(store.turn_count(Some("s1")), 0);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionContextStore::new(50);
        let (u, a) = exchange(1);
        store.append(Some("X"), u, a);

        assert_eq!(store.get(Some("X")).len(), 2);
        assert!(store.get(Some("Y")).is_empty());

        let (u2, a2) = exchange(2);
        store.append(Some("Y"), u2, a2);
        assert_eq!(store.get(Some("X")).len(), 2);
        assert_eq!(store.get(Some("Y")).len(), 2);
    }

    #[test]
    fn test_anonymous_callers_share_one_history() {
        let store = SessionContextStore::new(50);
        let (u, a) = exchange(1);
        store.append(None, u, a);
        let (u2, a2) = exchange(2);
        store.append(Some(""), u2, a2);
        let (u3, a3) = exchange(3);
        store.append(Some("   "), u3, a3);

        assert_eq!(store.get(None).len(), 6);
        assert_eq!(store.get(Some("")).len(), 6);
        assert_eq!(store.session_count(), 1);
    }

    #[test]
    fn test_clone_shares_data() {
        let store = SessionContextStore::new(50);
        let view = store.clone();
        let (u, a) = exchange(1);
        store.append(Some("s1"), u, a);
        assert_eq!(view.get(Some("s1")).len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_appends_lose_nothing() {
        let store = SessionContextStore::new(1000);
        let mut handles = Vec::new();

        for n in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let (u, a) = (
                    Turn::user(format!("u{n}")),
                    Turn::assistant(format!("a{n}")),
                );
                store.append(Some("shared"), u, a);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let turns = store.get(Some("shared"));
        assert_eq!(turns.len(), 100);
        // Every exchange arrived intact: a user turn is always directly
        // followed by its assistant turn.
        for pair in turns.chunks(2) {
            let expect = pair[0].text.trim_start_matches('u');
            assert_eq!(pair[1].text, format!("a{expect}"));
        }
    }

    #[tokio::test]
    async fn test_distinct_sessions_append_concurrently() {
        let store = SessionContextStore::new(50);
        let mut handles = Vec::new();

        for n in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let id = format!("session-{n}");
                let (u, a) = (Turn::user("hi"), Turn::assistant("hello"));
                store.append(Some(id.as_str()), u, a);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.session_count(), 20);
    }
}
