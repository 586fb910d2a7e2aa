//! Axum router configuration with middleware.
//!
//! Routes: `POST /chat` and `GET /health`. Middleware: permissive CORS and
//! request tracing. Unknown paths fall through to a JSON 404 with the same
//! envelope the chat endpoint uses.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(handlers::chat::handle_chat))
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - liveness plus the bootstrap phase and session count.
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": state.chat_service.state().to_string(),
        "sessions": state.chat_service.sessions().session_count(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Catch-all for undefined endpoints.
async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "message": "Endpoint not found",
        })),
    )
}
