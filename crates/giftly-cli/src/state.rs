//! Application state shared by the CLI commands.
//!
//! Resolves the data directory, loads `config.toml` and applies the
//! environment / flag overrides once at startup.

use giftly_infra::config::{apply_overrides, load_global_config, resolve_data_dir};
use giftly_infra::feedback::HttpFeedbackSubmitter;
use giftly_types::config::GlobalConfig;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: GlobalConfig,
}

impl AppState {
    /// Load configuration. `api_base` is the `--api-base` flag, if given.
    pub async fn init(api_base: Option<String>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = apply_overrides(load_global_config(&data_dir).await, api_base);

        tracing::debug!(
            data_dir = %data_dir.display(),
            api_base = %config.feedback.api_base,
            "Application state initialized"
        );

        Ok(Self { config })
    }

    /// HTTP submitter for the product feedback endpoint.
    pub fn feedback_submitter(&self) -> anyhow::Result<HttpFeedbackSubmitter> {
        HttpFeedbackSubmitter::new(&self.config.feedback)
    }
}
