//! Gateway configuration loader for Hemonet.
//!
//! Reads `hemonet.toml` and deserializes it into [`GatewayConfig`]. Falls
//! back to the defaults when the file is missing or malformed -- a broken
//! config file must never keep the gateway from starting. Environment
//! variables override the file for deployment-specific endpoints.

use std::path::Path;

use hemonet_types::config::GatewayConfig;

/// Environment variable overriding `[store] url`.
pub const STORE_URL_ENV: &str = "HEMONET_STORE_URL";

/// Load gateway configuration from a TOML file, then apply env overrides.
///
/// - If the file does not exist, returns [`GatewayConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and
///   returns the default.
/// - `HEMONET_STORE_URL`, when set, replaces the store URL from any source.
pub async fn load_config(config_path: &Path) -> GatewayConfig {
    let mut config = read_config_file(config_path).await;

    if let Ok(url) = std::env::var(STORE_URL_ENV) {
        config.store.url = url;
    }

    config
}

async fn read_config_file(config_path: &Path) -> GatewayConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return GatewayConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return GatewayConfig::default();
        }
    };

    match toml::from_str::<GatewayConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GatewayConfig::default()
        }
    }
}
