//! Shared domain types for Hemonet.
//!
//! This crate contains the domain types used across the Hemonet gateway:
//! conversation turns, session contexts, the knowledge snapshot, the
//! bootstrap state machine, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod knowledge;
