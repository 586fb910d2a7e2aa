//! Application state wiring the gateway together.
//!
//! `AppState` holds the single chat service instance shared by all request
//! handlers. Construction is explicit and happens exactly once at startup:
//! load config, wire the assistant, run the bootstrap to completion. There
//! is no global mutable state; everything flows through this struct.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use secrecy::SecretString;

use hemonet_core::chat::service::ChatService;
use hemonet_infra::assistant::GeminiAssistant;
use hemonet_infra::config::load_config;
use hemonet_infra::sqlite::SqliteBackingStore;
use hemonet_types::config::GatewayConfig;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Concrete chat service pinned to the infra provider.
pub type ConcreteChatService = ChatService<GeminiAssistant>;

/// Shared application state for the HTTP handlers and CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Initialize the application state: load config, wire the assistant,
    /// acquire the knowledge snapshot.
    ///
    /// Does not return until bootstrap has finished; an exhausted retry
    /// budget propagates as an error here, and the binary treats it as
    /// fatal. This is the only place where bootstrap failure ends the
    /// process.
    pub async fn init(config_path: &Path) -> anyhow::Result<Self> {
        let config = load_config(config_path).await;

        let api_key = std::env::var(API_KEY_ENV)
            .map(SecretString::from)
            .map_err(|_| anyhow!("{API_KEY_ENV} is not set"))?;

        let mut assistant = GeminiAssistant::new(api_key, config.assistant.model.clone());
        if let Some(base_url) = &config.assistant.base_url {
            assistant = assistant.with_base_url(base_url.clone());
        }

        let store = SqliteBackingStore::connect(&config.store.url)
            .with_context(|| format!("invalid store url '{}'", config.store.url))?;

        let chat_service = ChatService::new(assistant, &config.chat);
        chat_service
            .bootstrap(&store, &config.bootstrap)
            .await
            .context("bootstrap exhausted its retry budget; refusing to serve ungrounded replies")?;

        Ok(Self {
            chat_service: Arc::new(chat_service),
            config,
        })
    }
}
