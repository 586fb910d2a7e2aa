//! Startup snapshot acquisition with bounded, fixed-delay retries.
//!
//! The gateway must not answer chat traffic until it holds a knowledge
//! snapshot, so this loop runs to completion before the assistant is wired
//! up. Failures inside the retry budget are transient and never surface;
//! exhausting the budget returns [`BootstrapError::Exhausted`], and the one
//! place allowed to treat that as fatal is the API binary's startup path.

use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use hemonet_types::config::BootstrapConfig;
use hemonet_types::error::BootstrapError;
use hemonet_types::knowledge::KnowledgeSnapshot;

use crate::knowledge::render_collections;
use crate::repository::BackingStore;

/// Fetch and render the knowledge snapshot, retrying on failure.
///
/// Each attempt enumerates the collections and fetches every record; any
/// failure counts the attempt and sleeps the fixed `retry_delay_ms` before
/// the next one (no backoff). A reachable store with zero collections or
/// zero records is a success with the empty rendering, not an error.
pub async fn load_snapshot<S: BackingStore>(
    store: &S,
    config: &BootstrapConfig,
) -> Result<KnowledgeSnapshot, BootstrapError> {
    let delay = Duration::from_millis(config.retry_delay_ms);
    let max_attempts = config.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match fetch_collections(store).await {
            Ok(collections) => {
                let records: usize = collections.iter().map(|(_, r)| r.len()).sum();
                info!(
                    attempt,
                    collections = collections.len(),
                    records,
                    "knowledge snapshot loaded"
                );
                return Ok(KnowledgeSnapshot::new(render_collections(&collections)));
            }
            Err(BootstrapError::Transient(err)) => {
                let remaining = max_attempts - attempt;
                warn!(attempt, remaining, error = %err, "backing store attempt failed");
                if remaining > 0 {
                    tokio::time::sleep(delay).await;
                }
            }
            Err(err) => return Err(err),
        }
    }

    Err(BootstrapError::Exhausted {
        attempts: max_attempts,
    })
}

/// One snapshot attempt: collection names, sorted for a deterministic
/// rendering order, then every record of each.
async fn fetch_collections<S: BackingStore>(
    store: &S,
) -> Result<Vec<(String, Vec<Value>)>, BootstrapError> {
    let mut names = store.list_collections().await?;
    names.sort();

    let mut collections = Vec::with_capacity(names.len());
    for name in names {
        let records = store.fetch_all(&name).await?;
        collections.push((name, records));
    }
    Ok(collections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hemonet_types::error::StoreError;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Backing-store fake that fails its first `failures` calls to
    /// `list_collections`, then serves the given collections.
    struct FlakyStore {
        failures: AtomicU32,
        collections: Vec<(String, Vec<Value>)>,
    }

    impl FlakyStore {
        fn new(failures: u32, collections: Vec<(String, Vec<Value>)>) -> Self {
            Self {
                failures: AtomicU32::new(failures),
                collections,
            }
        }
    }

    impl BackingStore for FlakyStore {
        async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
            if self
                .failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |f| f.checked_sub(1))
                .is_ok()
            {
                return Err(StoreError::Connection("connection refused".to_string()));
            }
            Ok(self.collections.iter().map(|(n, _)| n.clone()).collect())
        }

        async fn fetch_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
            self.collections
                .iter()
                .find(|(n, _)| n == collection)
                .map(|(_, r)| r.clone())
                .ok_or_else(|| StoreError::Query(format!("no such collection: {collection}")))
        }
    }

    fn fast_config(max_attempts: u32) -> BootstrapConfig {
        BootstrapConfig {
            max_attempts,
            retry_delay_ms: 0,
        }
    }

    fn sample_collections() -> Vec<(String, Vec<Value>)> {
        vec![
            (
                "Hospitals".to_string(),
                vec![json!({"username": "city-hospital", "location": "Delhi"})],
            ),
            ("Donors".to_string(), vec![json!({"name": "Asha"})]),
        ]
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let store = FlakyStore::new(0, sample_collections());
        let snapshot = load_snapshot(&store, &fast_config(5)).await.unwrap();
        assert!(snapshot.rendered_text.contains("city-hospital"));
    }

    #[tokio::test]
    async fn test_succeeds_on_fifth_attempt() {
        let store = FlakyStore::new(4, sample_collections());
        let snapshot = load_snapshot(&store, &fast_config(5)).await.unwrap();
        assert!(snapshot.rendered_text.contains("## Hospitals"));
        assert!(snapshot.rendered_text.contains("Asha"));
    }

    #[tokio::test]
    async fn test_exhausts_after_max_attempts() {
        let store = FlakyStore::new(6, sample_collections());
        let err = load_snapshot(&store, &fast_config(5)).await.unwrap_err();
        match err {
            BootstrapError::Exhausted { attempts } => assert_eq!(attempts, 5),
            other => panic!("expected Exhausted, got {other:?}"),
        }
        // Only the budgeted attempts were consumed.
        assert_eq!(store.failures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_store_is_success() {
        let store = FlakyStore::new(0, vec![]);
        let snapshot = load_snapshot(&store, &fast_config(5)).await.unwrap();
        assert_eq!(snapshot.rendered_text, "(no records loaded)");
    }

    #[tokio::test]
    async fn test_empty_collection_is_success() {
        let store = FlakyStore::new(0, vec![("Donors".to_string(), vec![])]);
        let snapshot = load_snapshot(&store, &fast_config(5)).await.unwrap();
        assert_eq!(snapshot.rendered_text, "## Donors\n[]");
    }

    #[tokio::test]
    async fn test_collections_rendered_in_sorted_order() {
        let store = FlakyStore::new(0, sample_collections());
        let snapshot = load_snapshot(&store, &fast_config(1)).await.unwrap();
        let donors_at = snapshot.rendered_text.find("## Donors").unwrap();
        let hospitals_at = snapshot.rendered_text.find("## Hospitals").unwrap();
        assert!(donors_at < hospitals_at);
    }

    #[tokio::test]
    async fn test_zero_max_attempts_still_tries_once() {
        let store = FlakyStore::new(0, vec![]);
        assert!(load_snapshot(&store, &fast_config(0)).await.is_ok());
    }
}
