use thiserror::Error;

/// Errors from backing-store operations (used by the trait definitions in
/// hemonet-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from assistant provider operations.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("provider returned an empty response")]
    EmptyResponse,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,
}

/// Errors from the startup snapshot-acquisition sequence.
///
/// `Transient` failures are retried internally by the bootstrap loop and
/// never surface to callers; `Exhausted` is terminal and the process must
/// stop accepting chat traffic.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("transient bootstrap failure: {0}")]
    Transient(#[from] StoreError),

    #[error("bootstrap failed after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Errors surfaced by the chat service to the boundary layer.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("assistant is not initialized")]
    NotInitialized,

    #[error("upstream assistant failure: {0}")]
    Upstream(String),
}
