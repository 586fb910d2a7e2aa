//! SQLite implementation of the `BackingStore` port.
//!
//! The backing store is treated as a document database: each collection is
//! a table with a `document` TEXT column holding one JSON record per row.
//! The collection tables are owned and populated by the surrounding record
//! services; the gateway only reads them, once, during bootstrap.
//!
//! Pool options follow the same conventions as the rest of the stack:
//! WAL journal mode, foreign key enforcement, 5-second busy timeout.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use hemonet_core::repository::BackingStore;
use hemonet_types::error::StoreError;

/// SQLite-backed implementation of [`BackingStore`].
#[derive(Debug)]
pub struct SqliteBackingStore {
    pool: SqlitePool,
}

impl SqliteBackingStore {
    /// Open a lazy pool for the store at `url` (e.g.
    /// `sqlite://records.db?mode=rwc`).
    ///
    /// Connections are established on first use, so connection failures
    /// surface from the first query and flow through the bootstrap retry
    /// loop rather than short-circuiting it.
    pub fn connect(url: &str) -> Result<Self, StoreError> {
        let opts = SqliteConnectOptions::from_str(url)
            .map_err(|e| StoreError::Connection(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_lazy_with(opts);

        Ok(Self { pool })
    }

    /// Access the underlying pool (used by fixtures and ops tooling).
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl BackingStore for SqliteBackingStore {
    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn fetch_all(&self, collection: &str) -> Result<Vec<serde_json::Value>, StoreError> {
        // Table names cannot be bound as parameters; quote the identifier.
        let ident = collection.replace('"', "\"\"");
        let sql = format!("SELECT document FROM \"{ident}\"");

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let raw: String = row
                .try_get("document")
                .map_err(|e| StoreError::Query(e.to_string()))?;
            // A row that is not valid JSON degrades to its raw text instead
            // of failing the whole snapshot.
            let record = serde_json::from_str(&raw)
                .unwrap_or_else(|_| serde_json::Value::String(raw));
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn store_with_fixtures() -> (tempfile::TempDir, SqliteBackingStore) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("records.db").display());
        let store = SqliteBackingStore::connect(&url).unwrap();

        for table in ["Hospitals", "Donors"] {
            sqlx::query(&format!(
                "CREATE TABLE \"{table}\" (id INTEGER PRIMARY KEY, document TEXT NOT NULL)"
            ))
            .execute(store.pool())
            .await
            .unwrap();
        }

        sqlx::query("INSERT INTO Hospitals (document) VALUES (?1), (?2)")
            .bind(json!({"username": "city-hospital", "location": "Delhi"}).to_string())
            .bind(json!({"username": "red-cross", "specialties": ["cardiology"]}).to_string())
            .execute(store.pool())
            .await
            .unwrap();

        sqlx::query("INSERT INTO Donors (document) VALUES (?1)")
            .bind(json!({"name": "Asha", "blood_group": "AB+"}).to_string())
            .execute(store.pool())
            .await
            .unwrap();

        (dir, store)
    }

    #[tokio::test]
    async fn test_list_collections_sorted_without_internals() {
        let (_dir, store) = store_with_fixtures().await;
        let names = store.list_collections().await.unwrap();
        assert_eq!(names, vec!["Donors".to_string(), "Hospitals".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_all_parses_documents() {
        let (_dir, store) = store_with_fixtures().await;
        let records = store.fetch_all("Hospitals").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["username"], "city-hospital");
        assert_eq!(records[1]["specialties"][0], "cardiology");
    }

    #[tokio::test]
    async fn test_fetch_all_unknown_collection_errors() {
        let (_dir, store) = store_with_fixtures().await;
        let err = store.fetch_all("Missing").await.unwrap_err();
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[tokio::test]
    async fn test_malformed_document_degrades_to_raw_text() {
        let (_dir, store) = store_with_fixtures().await;
        sqlx::query("INSERT INTO Donors (document) VALUES ('not json at all')")
            .execute(store.pool())
            .await
            .unwrap();

        let records = store.fetch_all("Donors").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], serde_json::Value::String("not json at all".to_string()));
    }

    #[tokio::test]
    async fn test_empty_database_lists_no_collections() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("empty.db").display());
        let store = SqliteBackingStore::connect(&url).unwrap();
        assert!(store.list_collections().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_bad_url_errors() {
        let err = SqliteBackingStore::connect("not-a-url://???").unwrap_err();
        assert!(matches!(err, StoreError::Connection(_)));
    }
}
