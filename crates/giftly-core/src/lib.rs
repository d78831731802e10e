//! Business logic and port trait definitions for Giftly.
//!
//! This crate holds the wizard state machine, the message builder, the
//! feedback dialog and product card logic. It depends only on
//! `giftly-types` -- never on `giftly-infra` or any network crate. The
//! feedback transport is reached through the `FeedbackSubmitter` trait.

pub mod feedback;
pub mod message;
pub mod product;
pub mod wizard;
