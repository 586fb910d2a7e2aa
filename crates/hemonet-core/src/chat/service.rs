//! Chat service orchestrating grounded assistant exchanges.
//!
//! `ChatService` ties the pieces together for one `(message, session id)`
//! request: it checks the bootstrap phase, reads the session history, calls
//! the assistant provider with the fixed grounding instructions, and records
//! the exchange. It is generic over [`AssistantProvider`] so the core never
//! depends on hemonet-infra.

use std::sync::{OnceLock, RwLock};

use tracing::{info, warn};

use hemonet_types::chat::Turn;
use hemonet_types::config::{BootstrapConfig, ChatConfig};
use hemonet_types::error::{BootstrapError, ChatError};
use hemonet_types::knowledge::{BootstrapState, KnowledgeSnapshot};

use crate::assistant::{AssistantProvider, AssistantRequest};
use crate::bootstrap;
use crate::chat::store::SessionContextStore;
use crate::knowledge;
use crate::repository::BackingStore;

/// The snapshot and the instructions derived from it, written exactly once
/// when bootstrap completes.
struct Grounding {
    instructions: String,
    snapshot: KnowledgeSnapshot,
}

/// Grounded, session-aware chat orchestration.
///
/// Constructed in `NotStarted` phase; [`ChatService::bootstrap`] must run to
/// completion before [`ChatService::handle`] will serve. The grounding cell
/// is written before the phase flips to `Ready`, and the phase lives behind
/// an `RwLock`, so bootstrap completion happens-before any admitted request.
pub struct ChatService<A: AssistantProvider> {
    assistant: A,
    sessions: SessionContextStore,
    phase: RwLock<BootstrapState>,
    grounding: OnceLock<Grounding>,
}

impl<A: AssistantProvider> ChatService<A> {
    /// Create a not-yet-bootstrapped service.
    pub fn new(assistant: A, config: &ChatConfig) -> Self {
        Self {
            assistant,
            sessions: SessionContextStore::new(config.max_history_turns),
            phase: RwLock::new(BootstrapState::NotStarted),
            grounding: OnceLock::new(),
        }
    }

    /// Access the session store.
    pub fn sessions(&self) -> &SessionContextStore {
        &self.sessions
    }

    /// Current bootstrap phase.
    pub fn state(&self) -> BootstrapState {
        *self.phase.read().unwrap_or_else(|e| e.into_inner())
    }

    fn set_phase(&self, next: BootstrapState) {
        *self.phase.write().unwrap_or_else(|e| e.into_inner()) = next;
    }

    /// The loaded snapshot, once `Ready`.
    pub fn snapshot(&self) -> Option<&KnowledgeSnapshot> {
        self.grounding.get().map(|g| &g.snapshot)
    }

    /// Acquire the knowledge snapshot and make the assistant usable.
    ///
    /// Runs the bounded retry loop against the backing store; on success the
    /// grounding instructions are built once and the phase flips to `Ready`
    /// permanently. On exhaustion the phase flips to `Failed` and the error
    /// propagates; the caller decides whether that is fatal (the API binary
    /// does). Calling again once `Ready` is a no-op.
    pub async fn bootstrap<S: BackingStore>(
        &self,
        store: &S,
        config: &BootstrapConfig,
    ) -> Result<(), BootstrapError> {
        if self.state() == BootstrapState::Ready {
            return Ok(());
        }
        self.set_phase(BootstrapState::Connecting);

        match bootstrap::load_snapshot(store, config).await {
            Ok(snapshot) => {
                let instructions = knowledge::grounding_instructions(&snapshot);
                let _ = self.grounding.set(Grounding {
                    instructions,
                    snapshot,
                });
                // Grounding is in place before anyone can observe Ready.
                self.set_phase(BootstrapState::Ready);
                info!(provider = self.assistant.name(), "assistant initialized");
                Ok(())
            }
            Err(err) => {
                self.set_phase(BootstrapState::Failed);
                Err(err)
            }
        }
    }

    /// Answer one chat request.
    ///
    /// Validates the message, reads the resolved session's history, asks the
    /// provider, and on success records the (user, assistant) pair. A failed
    /// upstream call surfaces as [`ChatError::Upstream`] and leaves the
    /// history untouched -- failed exchanges are never recorded. No retries
    /// happen here; the boundary decides whether to retry the outer request.
    pub async fn handle(
        &self,
        message: &str,
        session_id: Option<&str>,
    ) -> Result<String, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::InvalidRequest(
                "message must not be empty".to_string(),
            ));
        }
        if self.state() != BootstrapState::Ready {
            return Err(ChatError::NotInitialized);
        }
        let grounding = self.grounding.get().ok_or(ChatError::NotInitialized)?;

        let history = self.sessions.get(session_id);
        let request = AssistantRequest {
            system: grounding.instructions.clone(),
            history,
            message: message.to_string(),
        };

        match self.assistant.reply(&request).await {
            Ok(reply) => {
                self.sessions
                    .append(session_id, Turn::user(message), Turn::assistant(&reply));
                Ok(reply)
            }
            Err(err) => {
                warn!(provider = self.assistant.name(), error = %err, "assistant call failed");
                Err(ChatError::Upstream(err.to_string()))
            }
        }
    }
}
