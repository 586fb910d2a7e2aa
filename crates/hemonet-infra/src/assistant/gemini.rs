//! GeminiAssistant -- concrete [`AssistantProvider`] implementation for the
//! Google Generative Language API.
//!
//! Sends non-streaming `generateContent` requests with the grounding
//! instructions as `systemInstruction` and the session history as
//! alternating `user`/`model` contents.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use hemonet_core::assistant::{AssistantProvider, AssistantRequest};
use hemonet_types::chat::TurnRole;
use hemonet_types::error::AssistantError;

use super::types::{
    GeminiContent, GeminiPart, GeminiRequest, GeminiResponse, GeminiSystemInstruction,
};

/// Gemini assistant provider.
///
/// Implements [`AssistantProvider`] for the `generateContent` endpoint.
pub struct GeminiAssistant {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiAssistant {
    /// Create a new Gemini provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Generative Language API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "gemini-2.0-flash")
    pub fn new(api_key: SecretString, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model,
        }
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the endpoint URL for this provider's model, without the key.
    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Convert a generic [`AssistantRequest`] into the Gemini wire shape.
    ///
    /// History roles map user -> `user` and assistant -> `model`; the new
    /// message is appended as a final `user` content.
    fn to_gemini_request(request: &AssistantRequest) -> GeminiRequest {
        let mut contents: Vec<GeminiContent> = request
            .history
            .iter()
            .map(|turn| GeminiContent {
                role: match turn.role {
                    TurnRole::User => "user".to_string(),
                    TurnRole::Assistant => "model".to_string(),
                },
                parts: vec![GeminiPart {
                    text: turn.text.clone(),
                }],
            })
            .collect();

        contents.push(GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: request.message.clone(),
            }],
        });

        GeminiRequest {
            contents,
            system_instruction: Some(GeminiSystemInstruction {
                parts: vec![GeminiPart {
                    text: request.system.clone(),
                }],
            }),
        }
    }

    /// Pull the reply text out of a parsed response.
    ///
    /// A body-level error object, a missing candidate, or an all-empty set
    /// of parts each map to a typed error; the service never sees `""`.
    fn extract_reply(response: GeminiResponse) -> Result<String, AssistantError> {
        if let Some(error) = response.error {
            return Err(AssistantError::Provider {
                message: error.message,
            });
        }

        if let Some(usage) = &response.usage_metadata {
            debug!(
                input_tokens = usage.prompt_token_count.unwrap_or(0),
                output_tokens = usage.candidates_token_count.unwrap_or(0),
                "gemini usage"
            );
        }

        let text = response
            .candidates
            .into_iter()
            .flatten()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .into_iter()
            .flatten()
            .filter_map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(AssistantError::EmptyResponse);
        }
        Ok(text)
    }
}

// GeminiAssistant intentionally does NOT derive Debug: the SecretString
// field keeps the key out of accidental formatting, and omitting Debug
// entirely removes the temptation.

impl AssistantProvider for GeminiAssistant {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn reply(&self, request: &AssistantRequest) -> Result<String, AssistantError> {
        let body = Self::to_gemini_request(request);
        let url = self.url();

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => AssistantError::AuthenticationFailed,
                429 => AssistantError::RateLimited,
                _ => AssistantError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let parsed: GeminiResponse = response.json().await.map_err(|e| {
            AssistantError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        Self::extract_reply(parsed)
    }
}
