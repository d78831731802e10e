//! Wizard step table.
//!
//! Each step owns a "required to advance" predicate over the selection.
//! Inserting a step means adding a variant and one arm per table below;
//! no other step is affected.

use std::fmt;

use giftly_types::filter::FilterSelection;
use serde::{Deserialize, Serialize};

/// One of the eight guided wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Occasion,
    Persona,
    Age,
    Gender,
    Interests,
    Budget,
    ExtraDetails,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 8] = [
        WizardStep::Occasion,
        WizardStep::Persona,
        WizardStep::Age,
        WizardStep::Gender,
        WizardStep::Interests,
        WizardStep::Budget,
        WizardStep::ExtraDetails,
        WizardStep::Review,
    ];

    pub const FIRST: WizardStep = WizardStep::Occasion;

    /// Total number of guided steps.
    pub const COUNT: u8 = Self::ALL.len() as u8;

    /// 1-based position of this step.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Occasion => 1,
            WizardStep::Persona => 2,
            WizardStep::Age => 3,
            WizardStep::Gender => 4,
            WizardStep::Interests => 5,
            WizardStep::Budget => 6,
            WizardStep::ExtraDetails => 7,
            WizardStep::Review => 8,
        }
    }

    /// Step for a 1-based position, if in range.
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// Short title shown in the progress header.
    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Occasion => "Occasion",
            WizardStep::Persona => "For Whom",
            WizardStep::Age => "Age",
            WizardStep::Gender => "Gender",
            WizardStep::Interests => "Interests",
            WizardStep::Budget => "Budget",
            WizardStep::ExtraDetails => "Extra Details",
            WizardStep::Review => "Review",
        }
    }

    /// The question asked on this step.
    pub fn prompt(self) -> &'static str {
        match self {
            WizardStep::Occasion => "What's the occasion?",
            WizardStep::Persona => "Who is this for?",
            WizardStep::Age => "What's their age?",
            WizardStep::Gender => "Gender",
            WizardStep::Interests => "What are they interested in?",
            WizardStep::Budget => "What's your budget?",
            WizardStep::ExtraDetails => "Any extra details?",
            WizardStep::Review => "Review your request",
        }
    }

    /// Whether the user may move past this step without answering it.
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            WizardStep::Gender | WizardStep::Interests | WizardStep::ExtraDetails | WizardStep::Review
        )
    }

    /// The can-advance predicate for this step.
    pub fn is_satisfied(self, selection: &FilterSelection) -> bool {
        match self {
            WizardStep::Occasion => selection.occasion.is_some(),
            WizardStep::Persona => selection.persona.is_some(),
            WizardStep::Age => selection.age.is_some(),
            WizardStep::Budget => selection.price_range.is_some(),
            WizardStep::Gender
            | WizardStep::Interests
            | WizardStep::ExtraDetails
            | WizardStep::Review => true,
        }
    }

    /// The following step, or `None` from the terminal review step.
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// The preceding step, or `None` from the first step.
    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
