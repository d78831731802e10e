//! Product feedback collection.
//!
//! `form` holds what the user enters, `dialog` drives a single submission
//! through a `FeedbackSubmitter` implementation (HTTP in `giftly-infra`).

pub mod dialog;
pub mod form;
pub mod submitter;
