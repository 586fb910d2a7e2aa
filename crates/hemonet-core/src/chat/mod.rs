//! Session-scoped conversation handling for Hemonet.
//!
//! `SessionContextStore` keeps the bounded per-session histories;
//! `ChatService` orchestrates one `(message, session id)` request against
//! the assistant provider.

pub mod service;
pub mod store;
