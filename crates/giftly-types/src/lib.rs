//! Shared domain types for Giftly.
//!
//! This crate contains the closed enumerations behind every wizard step, the
//! `FilterSelection` accumulated by a wizard session, the product and feedback
//! records exchanged with the shopping API, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod catalog;
pub mod config;
pub mod error;
pub mod feedback;
pub mod filter;
pub mod product;
