//! Conversation turn and session context types for Hemonet.
//!
//! A `Turn` is one message in a conversation, tagged by speaker role.
//! A `SessionContext` is the ordered, bounded history of one session,
//! owned exclusively by the session store in `hemonet-core`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// Speaker role of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// One message exchanged in a conversation.
///
/// Turns are immutable once created and ordered within their session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }
}

/// The conversation history of one session.
///
/// Created on the first message for a previously-unseen session id and
/// mutated only by the session store: exactly two turns (user, assistant)
/// are appended per successful exchange, and the oldest turns are dropped
/// from the front once the configured capacity is exceeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub turns: VecDeque<Turn>,
    pub last_touched: DateTime<Utc>,
}

impl SessionContext {
    /// Create an empty context for a session id.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            turns: VecDeque::new(),
            last_touched: Utc::now(),
        }
    }
}
