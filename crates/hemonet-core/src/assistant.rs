//! AssistantProvider trait definition.
//!
//! The assistant is the opaque generative-model capability that, given the
//! fixed grounding instructions and a conversation history, produces a reply
//! for a new user message. Implementations live in hemonet-infra (e.g.,
//! `GeminiAssistant`). Uses native async fn in traits (RPITIT, Rust 2024
//! edition).

use hemonet_types::chat::Turn;
use hemonet_types::error::AssistantError;

/// One reply request: fixed system instructions, prior turns, new message.
#[derive(Debug, Clone)]
pub struct AssistantRequest {
    /// Grounding instructions embedding the knowledge snapshot. Built once
    /// at bootstrap and identical for every request of the process lifetime.
    pub system: String,
    /// Prior turns of the session, oldest first.
    pub history: Vec<Turn>,
    /// The new user message.
    pub message: String,
}

/// Trait for assistant model backends.
///
/// A reply is a single non-empty string; providers must map an empty or
/// malformed upstream response to an [`AssistantError`], never to `""`.
/// No retries happen at this layer -- a single upstream failure surfaces
/// immediately to the caller.
pub trait AssistantProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Produce a reply for the request.
    fn reply(
        &self,
        request: &AssistantRequest,
    ) -> impl std::future::Future<Output = Result<String, AssistantError>> + Send;
}
