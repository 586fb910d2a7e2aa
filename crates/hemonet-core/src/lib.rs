//! Business logic and port trait definitions for Hemonet.
//!
//! This crate defines the "ports" (the backing-store and assistant-provider
//! traits) that the infrastructure layer implements, plus the startup
//! bootstrap sequence and the session-scoped chat orchestration. It depends
//! only on `hemonet-types` -- never on `hemonet-infra` or any IO crate.

pub mod assistant;
pub mod bootstrap;
pub mod chat;
pub mod knowledge;
pub mod repository;
