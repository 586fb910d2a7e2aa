//! Knowledge snapshot and bootstrap state types for Hemonet.
//!
//! The snapshot is the rendered, point-in-time textual view of the backing
//! store used to ground assistant replies. It is built exactly once during
//! startup and read-only afterward; callers wanting fresh data restart the
//! process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Rendered view of the backing-store records, captured at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSnapshot {
    pub rendered_text: String,
    pub loaded_at: DateTime<Utc>,
}

impl KnowledgeSnapshot {
    /// Wrap rendered text with a load timestamp of now.
    pub fn new(rendered_text: impl Into<String>) -> Self {
        Self {
            rendered_text: rendered_text.into(),
            loaded_at: Utc::now(),
        }
    }
}

/// Process-wide bootstrap lifecycle.
///
/// Transitions only during startup: `NotStarted` -> `Connecting` -> `Ready`
/// on success, or `Connecting` -> `Failed` once the retry budget is
/// exhausted. `Ready` is permanent for the process lifetime; `Failed` is
/// terminal and the process must not serve chat traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapState {
    NotStarted,
    Connecting,
    Ready,
    Failed,
}

impl fmt::Display for BootstrapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapState::NotStarted => write!(f, "not_started"),
            BootstrapState::Connecting => write!(f, "connecting"),
            BootstrapState::Ready => write!(f, "ready"),
            BootstrapState::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for BootstrapState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_started" => Ok(BootstrapState::NotStarted),
            "connecting" => Ok(BootstrapState::Connecting),
            "ready" => Ok(BootstrapState::Ready),
            "failed" => Ok(BootstrapState::Failed),
            other => Err(format!("invalid bootstrap state: '{other}'")),
        }
    }
}

impl Default for BootstrapState {
    fn default() -> Self {
        BootstrapState::NotStarted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_state_roundtrip() {
        for state in [
            BootstrapState::NotStarted,
            BootstrapState::Connecting,
            BootstrapState::Ready,
            BootstrapState::Failed,
        ] {
            let s = state.to_string();
            let parsed: BootstrapState = s.parse().unwrap();
            assert_eq!(state, parsed);
        }
    }

    #[test]
    fn test_bootstrap_state_serde() {
        let json = serde_json::to_string(&BootstrapState::Ready).unwrap();
        assert_eq!(json, "\"ready\"");
        let parsed: BootstrapState = serde_json::from_str("\"not_started\"").unwrap();
        assert_eq!(parsed, BootstrapState::NotStarted);
    }

    #[test]
    fn test_bootstrap_state_default() {
        assert_eq!(BootstrapState::default(), BootstrapState::NotStarted);
    }

    #[test]
    fn test_snapshot_new_stamps_load_time() {
        let before = Utc::now();
        let snapshot = KnowledgeSnapshot::new("## Hospitals\n[]");
        assert_eq!(snapshot.rendered_text, "## Hospitals\n[]");
        assert!(snapshot.loaded_at >= before);
    }
}
