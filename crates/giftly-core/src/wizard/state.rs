//! `GuidedWizard` session state.
//!
//! A wizard owns one [`FilterSelection`] and the current [`WizardStep`].
//! Chip and text handlers mutate the selection; `advance` / `retreat`
//! move between steps, gated by the step table. Completing the wizard (from
//! the review step or by submitting a direct request) produces the final
//! message exactly once and hands it to the caller.

use giftly_types::catalog::{AgeRange, Gender, Interest, Occasion, Persona, PriceRange};
use giftly_types::error::WizardError;
use giftly_types::filter::{FilterMode, FilterSelection, MAX_INTERESTS, Toggle};
use tracing::{debug, info};
use uuid::Uuid;

use super::step::WizardStep;
use crate::message::build_message;

/// Result of a successful `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Moved forward to the given step.
    Moved(WizardStep),
    /// The review step was confirmed; carries the final message.
    Completed(String),
}

type CompletionCallback = Box<dyn FnOnce(&str)>;

/// One wizard session.
pub struct GuidedWizard {
    session_id: Uuid,
    step: WizardStep,
    selection: FilterSelection,
    completed: bool,
    on_complete: Option<CompletionCallback>,
}

impl std::fmt::Debug for GuidedWizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuidedWizard")
            .field("session_id", &self.session_id)
            .field("step", &self.step)
            .field("selection", &self.selection)
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

impl Default for GuidedWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl GuidedWizard {
    /// Start a fresh session: guided mode, step 1, empty selection.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::now_v7(),
            step: WizardStep::FIRST,
            selection: FilterSelection::new(),
            completed: false,
            on_complete: None,
        }
    }

    /// Register the callback invoked with the final message on completion.
    pub fn on_complete(mut self, callback: impl FnOnce(&str) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn mode(&self) -> FilterMode {
        self.selection.mode
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// `(current step number, total steps)` for the progress header.
    pub fn progress(&self) -> (u8, u8) {
        (self.step.number(), WizardStep::COUNT)
    }

    /// Switch between guided and direct mode.
    ///
    /// Always resets to step 1; fields entered in either mode are kept.
    pub fn set_mode(&mut self, mode: FilterMode) {
        debug!(session = %self.session_id, from = %self.selection.mode, to = %mode, "Switching wizard mode");
        self.selection.mode = mode;
        self.step = WizardStep::FIRST;
    }

    // -----------------------------------------------------------------------
    // Input handlers
    // -----------------------------------------------------------------------

    pub fn select_occasion(&mut self, occasion: Occasion) {
        self.selection.occasion = Some(occasion);
    }

    pub fn select_persona(&mut self, persona: Persona) {
        self.selection.persona = Some(persona);
    }

    pub fn select_age(&mut self, age: AgeRange) {
        self.selection.age = Some(age);
    }

    pub fn select_gender(&mut self, gender: Gender) {
        self.selection.gender = gender;
    }

    pub fn select_price_range(&mut self, range: PriceRange) {
        self.selection.price_range = Some(range);
    }

    /// Whether the chip for `interest` is currently enabled.
    pub fn can_select_interest(&self, interest: Interest) -> bool {
        self.selection.interests.can_toggle(interest)
    }

    /// Add or remove an interest, keeping insertion order.
    ///
    /// Adding a fifth interest is rejected and leaves the set unchanged.
    pub fn toggle_interest(&mut self, interest: Interest) -> Result<Toggle, WizardError> {
        match self.selection.interests.toggle(interest) {
            Toggle::Rejected => Err(WizardError::InterestLimit { max: MAX_INTERESTS }),
            toggle => Ok(toggle),
        }
    }

    /// Set the optional extra-details note (truncated to 140 characters).
    pub fn set_extra_details(&mut self, text: &str) {
        self.selection.set_extra_details(text);
    }

    /// Set the direct-mode request (truncated to 300 characters).
    pub fn set_direct_prompt(&mut self, text: &str) {
        self.selection.set_direct_prompt(text);
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Whether the primary action (Next / Start Shopping) is enabled.
    pub fn can_proceed(&self) -> bool {
        match self.selection.mode {
            FilterMode::Direct => self
                .selection
                .direct_prompt
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty()),
            FilterMode::Guided => self.step.is_satisfied(&self.selection),
        }
    }

    /// Move forward one step, or complete the session from the review step.
    ///
    /// Leaves the state unchanged and returns an error when the current
    /// step's requirement is not met.
    pub fn advance(&mut self) -> Result<Transition, WizardError> {
        if self.completed {
            return Err(WizardError::AlreadyCompleted);
        }
        if self.selection.mode == FilterMode::Direct {
            return self.submit_direct().map(Transition::Completed);
        }
        if !self.can_proceed() {
            debug!(session = %self.session_id, step = %self.step, "Step requirement not met");
            return Err(WizardError::StepIncomplete(self.step.number()));
        }

        match self.step.next() {
            Some(next) => {
                debug!(session = %self.session_id, from = %self.step, to = %next, "Advancing wizard");
                self.step = next;
                Ok(Transition::Moved(next))
            }
            None => Ok(Transition::Completed(self.complete())),
        }
    }

    /// Move back one step. Returns the new step, or `None` on step 1.
    pub fn retreat(&mut self) -> Option<WizardStep> {
        let previous = self.step.previous()?;
        debug!(session = %self.session_id, from = %self.step, to = %previous, "Retreating wizard");
        self.step = previous;
        Some(previous)
    }

    /// Submit the direct-mode request.
    ///
    /// Requires direct mode and a non-blank prompt. Returns the
    /// whitespace-normalized text.
    pub fn submit_direct(&mut self) -> Result<String, WizardError> {
        if self.completed {
            return Err(WizardError::AlreadyCompleted);
        }
        if self.selection.mode != FilterMode::Direct {
            return Err(WizardError::WrongMode { expected: "direct" });
        }
        if !self.can_proceed() {
            return Err(WizardError::StepIncomplete(WizardStep::FIRST.number()));
        }
        Ok(self.complete())
    }

    /// The message the review step currently previews.
    pub fn preview_message(&self) -> String {
        build_message(&self.selection)
    }

    fn complete(&mut self) -> String {
        let message = build_message(&self.selection);
        self.completed = true;
        info!(
            session = %self.session_id,
            mode = %self.selection.mode,
            chars = message.chars().count(),
            "Wizard completed"
        );
        if let Some(callback) = self.on_complete.take() {
            callback(&message);
        }
        message
    }
}
