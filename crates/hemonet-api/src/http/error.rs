//! Chat error mapping to HTTP status codes and the wire envelope.
//!
//! The wire contract is `{ "success": false, "message": "..." }` with 400
//! for invalid requests and 500 for an uninitialized assistant or an
//! upstream failure. Errors are mapped here and nowhere else -- handlers
//! just `?` them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use hemonet_types::error::ChatError;

/// Boundary-level error that maps to HTTP responses.
#[derive(Debug)]
pub struct AppError(pub ChatError);

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ChatError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ChatError::NotInitialized => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI model is not initialized. Try restarting the server.".to_string(),
            ),
            ChatError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while processing your request.".to_string(),
            ),
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_maps_to_400() {
        let resp = AppError(ChatError::InvalidRequest("message must not be empty".into()))
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_initialized_maps_to_500() {
        let resp = AppError(ChatError::NotInitialized).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_maps_to_500_without_leaking_detail() {
        let resp = AppError(ChatError::Upstream("provider error: HTTP 503".into()))
            .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
