//! HTTP feedback submitter.
//!
//! Implements `FeedbackSubmitter` by posting the feedback record as JSON to
//! `{api_base}/api/feedback/product`. Any 2xx is success; every other status
//! and every transport error is a failure. One attempt only.

use std::time::Duration;

use anyhow::Context;
use tracing::debug;

use giftly_core::feedback::submitter::FeedbackSubmitter;
use giftly_types::config::FeedbackConfig;
use giftly_types::error::FeedbackError;
use giftly_types::feedback::ProductFeedback;

/// Path of the product feedback endpoint, relative to the API base.
pub const FEEDBACK_PATH: &str = "/api/feedback/product";

pub struct HttpFeedbackSubmitter {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFeedbackSubmitter {
    /// Create a submitter from the `[feedback]` config section.
    pub fn new(config: &FeedbackConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client for feedback API")?;

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of the feedback endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{FEEDBACK_PATH}", self.base_url)
    }
}

impl FeedbackSubmitter for HttpFeedbackSubmitter {
    async fn submit(&self, feedback: &ProductFeedback) -> Result<(), FeedbackError> {
        let url = self.endpoint();
        debug!(%url, product_id = %feedback.product_id, rating = feedback.rating.stars(), "Posting product feedback");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(feedback)
            .send()
            .await
            .map_err(|e| FeedbackError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), %body, "Feedback API returned an error");
            return Err(FeedbackError::Rejected {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
