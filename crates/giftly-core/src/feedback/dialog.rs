//! Feedback dialog: one form, one submitter, one request in flight.
//!
//! Submission is split into `begin_submit` (validate, mark in-flight, shape
//! the payload) and `finish_submit` (apply the outcome) so that an
//! event-driven UI can disable the submit button while a request runs.
//! `submit` chains both around the submitter call.

use giftly_types::error::FeedbackError;
use giftly_types::feedback::{FeedbackTarget, ProductFeedback};
use tracing::{info, warn};

use super::form::FeedbackForm;
use super::submitter::FeedbackSubmitter;

pub const SUCCESS_NOTICE: &str = "Thanks \u{2014} your feedback was submitted.";
pub const FAILURE_NOTICE: &str = "Failed to submit feedback. Please try again.";

/// Transient user-visible notice (the toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

pub struct FeedbackDialog<S: FeedbackSubmitter> {
    form: FeedbackForm,
    submitter: S,
    open: bool,
    submitting: bool,
    error: Option<String>,
    notice: Option<Notice>,
}

impl<S: FeedbackSubmitter> FeedbackDialog<S> {
    /// Open a dialog for `target`, optionally pre-filling the original query.
    pub fn open(target: FeedbackTarget, user_query: Option<&str>, submitter: S) -> Self {
        let form = FeedbackForm::new(target);
        let form = match user_query {
            Some(query) => form.with_user_query(query),
            None => form,
        };
        Self {
            form,
            submitter,
            open: true,
            submitting: false,
            error: None,
            notice: None,
        }
    }

    pub fn form(&self) -> &FeedbackForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FeedbackForm {
        &mut self.form
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Inline error shown inside the dialog.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Notice raised by the most recent submission, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Product title with markup removed, for the dialog header.
    pub fn display_title(&self) -> String {
        strip_html(&self.form.target().product_title)
    }

    /// Validate the form and mark a submission as in flight.
    pub fn begin_submit(&mut self) -> Result<ProductFeedback, FeedbackError> {
        if self.submitting {
            return Err(FeedbackError::SubmissionInProgress);
        }
        let payload = match self.form.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };
        self.error = None;
        self.submitting = true;
        Ok(payload)
    }

    /// Apply the outcome of the in-flight submission.
    ///
    /// Success closes the dialog and clears the form. Failure keeps every
    /// entered value so the user can retry.
    pub fn finish_submit(&mut self, outcome: Result<(), FeedbackError>) -> Result<(), FeedbackError> {
        self.submitting = false;
        let target = self.form.target();
        match outcome {
            Ok(()) => {
                info!(product_id = %target.product_id, session_id = %target.session_id, "Feedback submitted");
                self.notice = Some(Notice::Success(SUCCESS_NOTICE.to_string()));
                self.form.reset();
                self.error = None;
                self.open = false;
                Ok(())
            }
            Err(err) => {
                warn!(product_id = %target.product_id, error = %err, "Feedback submission failed");
                self.notice = Some(Notice::Error(FAILURE_NOTICE.to_string()));
                self.error = Some(FAILURE_NOTICE.to_string());
                Err(err)
            }
        }
    }

    /// Validate, send once, and apply the outcome.
    pub async fn submit(&mut self) -> Result<(), FeedbackError> {
        let payload = self.begin_submit()?;
        let outcome = self.submitter.submit(&payload).await;
        self.finish_submit(outcome)
    }

    /// Close the dialog, discarding what was entered.
    ///
    /// Ignored while a submission is in flight.
    pub fn cancel(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.form.reset();
        self.error = None;
        self.open = false;
        true
    }
}

/// Remove markup from `html`, keeping only its text content.
///
/// A `<` only opens a tag when followed by a letter, `/` or `!`; any other
/// `<` is literal text.
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut chars = html.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            '<' if chars
                .peek()
                .is_some_and(|n| n.is_ascii_alphabetic() || matches!(*n, '/' | '!')) =>
            {
                in_tag = true;
            }
            _ => text.push(c),
        }
    }

    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use giftly_types::feedback::FeedbackReason;

    use super::*;

    /// In-memory submitter recording every payload it receives.
    struct RecordingSubmitter {
        fail_with: Option<FeedbackError>,
        calls: AtomicUsize,
        received: Mutex<Vec<ProductFeedback>>,
    }

    impl RecordingSubmitter {
        fn ok() -> Self {
            Self {
                fail_with: None,
                calls: AtomicUsize::new(0),
                received: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: FeedbackError) -> Self {
            Self {
                fail_with: Some(err),
                ..Self::ok()
            }
        }
    }

    impl FeedbackSubmitter for RecordingSubmitter {
        async fn submit(&self, feedback: &ProductFeedback) -> Result<(), FeedbackError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.received.lock().unwrap().push(feedback.clone());
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    fn target() -> FeedbackTarget {
        FeedbackTarget {
            session_id: "sess-9".to_string(),
            message_id: "msg-9".to_string(),
            product_id: "prod-9".to_string(),
            product_title: "Brass <em>Diya</em> &amp; Stand".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_without_rating_is_rejected_locally() {
        let mut dialog = FeedbackDialog::open(target(), None, RecordingSubmitter::ok());
        let err = dialog.submit().await.unwrap_err();
        assert_eq!(err, FeedbackError::MissingRating);
        assert_eq!(dialog.error(), Some("Please provide a rating"));
        assert!(dialog.is_open());
        assert_eq!(dialog.submitter.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_submit_resets_and_closes() {
        let mut dialog = FeedbackDialog::open(target(), Some("Diwali for mom"), RecordingSubmitter::ok());
        dialog.form_mut().set_rating(5).unwrap();
        dialog.form_mut().toggle_reason(FeedbackReason::BetterAlternatives).unwrap();

        dialog.submit().await.unwrap();

        assert!(!dialog.is_open());
        assert!(!dialog.is_submitting());
        assert_eq!(dialog.notice(), Some(&Notice::Success(SUCCESS_NOTICE.to_string())));
        assert!(dialog.form().rating().is_none());
        assert!(dialog.form().reasons().is_empty());

        let received = dialog.submitter.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].product_id, "prod-9");
        assert_eq!(received[0].user_query.as_deref(), Some("Diwali for mom"));
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_data_for_retry() {
        let submitter = RecordingSubmitter::failing(FeedbackError::Rejected { status: 500 });
        let mut dialog = FeedbackDialog::open(target(), None, submitter);
        dialog.form_mut().set_rating(2).unwrap();
        dialog.form_mut().set_more_details("wrong colour");

        let err = dialog.submit().await.unwrap_err();
        assert_eq!(err, FeedbackError::Rejected { status: 500 });
        assert!(dialog.is_open());
        assert!(!dialog.is_submitting());
        assert_eq!(dialog.error(), Some(FAILURE_NOTICE));
        assert_eq!(dialog.notice(), Some(&Notice::Error(FAILURE_NOTICE.to_string())));
        assert_eq!(dialog.form().rating().map(|r| r.stars()), Some(2));
        assert_eq!(dialog.form().more_details(), "wrong colour");

        // No automatic retry: exactly one call was made.
        assert_eq!(dialog.submitter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_second_submit_while_in_flight_is_rejected() {
        let mut dialog = FeedbackDialog::open(target(), None, RecordingSubmitter::ok());
        dialog.form_mut().set_rating(3).unwrap();

        dialog.begin_submit().unwrap();
        assert!(dialog.is_submitting());
        assert_eq!(dialog.begin_submit(), Err(FeedbackError::SubmissionInProgress));
        assert!(!dialog.cancel());

        dialog.finish_submit(Ok(())).unwrap();
        assert!(!dialog.is_submitting());
    }

    #[test]
    fn test_cancel_discards_entries() {
        let mut dialog = FeedbackDialog::open(target(), None, RecordingSubmitter::ok());
        dialog.form_mut().set_rating(4).unwrap();
        assert!(dialog.cancel());
        assert!(!dialog.is_open());
        assert!(dialog.form().rating().is_none());
    }

    #[test]
    fn test_display_title_strips_markup() {
        let dialog = FeedbackDialog::open(target(), None, RecordingSubmitter::ok());
        assert_eq!(dialog.display_title(), "Brass Diya & Stand");
    }

    #[test]
    fn test_strip_html_plain_text_unchanged() {
        assert_eq!(strip_html("Plain title"), "Plain title");
        assert_eq!(strip_html("<p>a &lt; b</p>"), "a < b");
    }

    #[test]
    fn test_strip_html_keeps_bare_angle_brackets() {
        assert_eq!(strip_html("Mug < 500ml capacity"), "Mug < 500ml capacity");
        assert_eq!(strip_html("<b>1<2</b> and 3 > 2"), "1<2 and 3 > 2");
        assert_eq!(strip_html("a<!-- note -->b</br>"), "ab");
    }
}
