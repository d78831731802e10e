//! Guided gift-finder wizard.
//!
//! `step` holds the ordered step table and its can-advance predicates;
//! `state` holds the `GuidedWizard` session that the UI drives.

pub mod state;
pub mod step;
