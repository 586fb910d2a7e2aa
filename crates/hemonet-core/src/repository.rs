//! BackingStore trait definition.
//!
//! The backing store is the external document database holding the domain
//! records (hospitals, donors, ...) that ground assistant replies. The
//! gateway only ever reads from it, once, during bootstrap.
//!
//! Implementations live in hemonet-infra (e.g., `SqliteBackingStore`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use hemonet_types::error::StoreError;

/// Read-only port onto the backing document store.
///
/// Connection pooling and lifecycle belong to the implementation; a value
/// of this trait is assumed connected.
pub trait BackingStore: Send + Sync {
    /// Enumerate the collection names present in the store.
    fn list_collections(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Fetch every record of one collection as raw JSON documents.
    ///
    /// Record shapes are arbitrary; no schema validation is performed.
    fn fetch_all(
        &self,
        collection: &str,
    ) -> impl std::future::Future<Output = Result<Vec<serde_json::Value>, StoreError>> + Send;
}
