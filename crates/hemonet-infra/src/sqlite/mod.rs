//! SQLite-backed document store for Hemonet.

pub mod store;

pub use store::SqliteBackingStore;
