//! Feedback submitter trait definition.

use giftly_types::error::FeedbackError;
use giftly_types::feedback::ProductFeedback;

/// Port for delivering one feedback record to the shopping API.
///
/// Implementations live in giftly-infra (e.g., HttpFeedbackSubmitter).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait FeedbackSubmitter: Send + Sync {
    /// Send a single feedback record. No retries: any failure is returned
    /// to the caller as-is.
    fn submit(
        &self,
        feedback: &ProductFeedback,
    ) -> impl std::future::Future<Output = Result<(), FeedbackError>> + Send;
}
