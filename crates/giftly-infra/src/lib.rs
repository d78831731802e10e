//! Infrastructure layer for Giftly.
//!
//! Contains implementations of the port traits defined in `giftly-core`:
//! the reqwest-based feedback submitter, plus config file loading and data
//! directory resolution.

pub mod config;
pub mod feedback;
