//! Infrastructure layer for Hemonet.
//!
//! Contains implementations of the ports defined in `hemonet-core`:
//! the SQLite-backed document store, the Gemini assistant client, and the
//! TOML configuration loader.

pub mod assistant;
pub mod config;
pub mod sqlite;
