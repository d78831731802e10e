//! Global configuration types for Giftly.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls where
//! product feedback is sent and how long a submission may take.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.giftly/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

/// Settings for the product feedback API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Base URL of the shopping API; `/api/feedback/product` is appended.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Request timeout for one submission, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with feedback requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_base() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    "giftly-feedback/0.1".to_string()
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}
