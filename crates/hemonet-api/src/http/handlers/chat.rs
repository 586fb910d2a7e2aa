//! Chat HTTP handler.
//!
//! POST /chat with body `{ "message": "...", "sessionId": "..." }` (the
//! session id is optional; absent or blank ids share the anonymous
//! session). Replies `{ "success": true, "reply": "..." }` on 200; error
//! mapping lives in [`crate::http::error`].

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user message to answer.
    pub message: String,
    /// Conversation grouping key supplied by the client.
    pub session_id: Option<String>,
}

/// Success body for the chat endpoint.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub reply: String,
}

/// POST /chat - answer one grounded chat message.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let reply = state
        .chat_service
        .handle(&body.message, body.session_id.as_deref())
        .await?;

    tracing::info!(
        %request_id,
        session = body.session_id.as_deref().unwrap_or("anonymous"),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "chat exchange complete"
    );

    Ok(Json(ChatResponse {
        success: true,
        reply,
    }))
}
