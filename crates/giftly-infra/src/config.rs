//! Global configuration loader for Giftly.
//!
//! Reads `config.toml` from the data directory (`~/.giftly/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::{Path, PathBuf};

use giftly_types::config::GlobalConfig;

/// Minimum feedback request timeout (safety floor).
const MIN_TIMEOUT_SECS: u64 = 1;

/// Resolve the data directory.
///
/// `GIFTLY_DATA_DIR` wins; otherwise `~/.giftly`; otherwise `./.giftly`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("GIFTLY_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".giftly");
    }

    PathBuf::from(".giftly")
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Apply environment and command-line overrides on top of the file config.
///
/// Priority for the API base: explicit override, then `GIFTLY_API_BASE`,
/// then the file value. A trailing slash is stripped and the timeout is
/// floored at one second.
pub fn apply_overrides(mut config: GlobalConfig, api_base: Option<String>) -> GlobalConfig {
    let env_base = std::env::var("GIFTLY_API_BASE").ok().filter(|v| !v.is_empty());
    if let Some(base) = api_base.or(env_base) {
        config.feedback.api_base = base;
    }
    config.feedback.api_base = config.feedback.api_base.trim_end_matches('/').to_string();
    config.feedback.timeout_secs = config.feedback.timeout_secs.max(MIN_TIMEOUT_SECS);
    config
}
