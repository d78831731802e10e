//! The selection accumulated by one wizard session.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{AgeRange, Gender, Interest, Occasion, Persona, PriceRange};

/// Maximum number of interests a selection may hold.
pub const MAX_INTERESTS: usize = 4;

/// Character limit for the optional extra-details note (step 7).
pub const EXTRA_DETAILS_MAX_CHARS: usize = 140;

/// Character limit for the direct-mode free-text request.
pub const DIRECT_PROMPT_MAX_CHARS: usize = 300;

/// Truncate `text` to at most `max` Unicode scalar values.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Top-level wizard mode.
///
/// - Guided: eight structured steps composing a message
/// - Direct: one free-text request used as the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    Guided,
    Direct,
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Guided => write!(f, "guided"),
            FilterMode::Direct => write!(f, "direct"),
        }
    }
}

/// Outcome of toggling a member of a capped, ordered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    Rejected,
}

/// Ordered, duplicate-free set of at most [`MAX_INTERESTS`] interests.
///
/// Insertion order is preserved for display and message assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InterestSet(Vec<Interest>);

impl InterestSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_INTERESTS
    }

    pub fn contains(&self, interest: Interest) -> bool {
        self.0.contains(&interest)
    }

    pub fn iter(&self) -> impl Iterator<Item = Interest> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Interest] {
        &self.0
    }

    /// Whether the chip for `interest` is enabled: selected chips can always
    /// be removed, unselected ones only while the set has room.
    pub fn can_toggle(&self, interest: Interest) -> bool {
        self.contains(interest) || !self.is_full()
    }

    /// Remove `interest` if present, otherwise append it if there is room.
    pub fn toggle(&mut self, interest: Interest) -> Toggle {
        if let Some(pos) = self.0.iter().position(|i| *i == interest) {
            self.0.remove(pos);
            Toggle::Removed
        } else if self.is_full() {
            Toggle::Rejected
        } else {
            self.0.push(interest);
            Toggle::Added
        }
    }
}

impl<'de> Deserialize<'de> for InterestSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<Interest>::deserialize(deserializer)?;
        let mut set = InterestSet::new();
        for interest in raw {
            if set.contains(interest) {
                continue;
            }
            if set.toggle(interest) == Toggle::Rejected {
                return Err(serde::de::Error::custom(format!(
                    "at most {MAX_INTERESTS} interests can be selected"
                )));
            }
        }
        Ok(set)
    }
}

/// Everything a wizard session has collected so far.
///
/// Created empty at wizard start and discarded once the final message has
/// been handed to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    #[serde(default)]
    pub mode: FilterMode,
    pub occasion: Option<Occasion>,
    pub persona: Option<Persona>,
    pub age: Option<AgeRange>,
    /// Never absent; "Prefer not to say" unless the user picks otherwise.
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub interests: InterestSet,
    pub price_range: Option<PriceRange>,
    /// Stored as typed; trimmed only when used.
    pub extra_details: Option<String>,
    pub direct_prompt: Option<String>,
}

impl FilterSelection {
    /// An empty guided selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extra-details note, truncated to [`EXTRA_DETAILS_MAX_CHARS`].
    pub fn set_extra_details(&mut self, text: &str) {
        self.extra_details = Some(truncate_chars(text, EXTRA_DETAILS_MAX_CHARS));
    }

    /// Set the direct-mode request, truncated to [`DIRECT_PROMPT_MAX_CHARS`].
    pub fn set_direct_prompt(&mut self, text: &str) {
        self.direct_prompt = Some(truncate_chars(text, DIRECT_PROMPT_MAX_CHARS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_selection_defaults() {
        let selection = FilterSelection::new();
        assert_eq!(selection.mode, FilterMode::Guided);
        assert_eq!(selection.gender, Gender::PreferNotToSay);
        assert!(selection.interests.is_empty());
        assert!(selection.occasion.is_none());
        assert!(selection.direct_prompt.is_none());
    }

    #[test]
    fn test_interest_toggle_preserves_order_and_caps() {
        let mut set = InterestSet::new();
        assert_eq!(set.toggle(Interest::Music), Toggle::Added);
        assert_eq!(set.toggle(Interest::Beauty), Toggle::Added);
        assert_eq!(set.toggle(Interest::Travel), Toggle::Added);
        assert_eq!(set.toggle(Interest::Food), Toggle::Added);
        assert!(set.is_full());

        assert!(!set.can_toggle(Interest::Pets));
        assert_eq!(set.toggle(Interest::Pets), Toggle::Rejected);
        assert_eq!(
            set.as_slice(),
            &[Interest::Music, Interest::Beauty, Interest::Travel, Interest::Food]
        );

        assert!(set.can_toggle(Interest::Beauty));
        assert_eq!(set.toggle(Interest::Beauty), Toggle::Removed);
        assert_eq!(set.toggle(Interest::Pets), Toggle::Added);
        assert_eq!(
            set.as_slice(),
            &[Interest::Music, Interest::Travel, Interest::Food, Interest::Pets]
        );
    }

    #[test]
    fn test_truncate_chars_counts_scalars_not_bytes() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 140), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_setters_truncate_free_text() {
        let mut selection = FilterSelection::new();
        selection.set_extra_details(&"x".repeat(200));
        assert_eq!(selection.extra_details.as_deref().map(str::len), Some(140));

        selection.set_direct_prompt(&"y".repeat(301));
        assert_eq!(selection.direct_prompt.as_deref().map(str::len), Some(300));

        selection.set_extra_details("  keep the spaces  ");
        assert_eq!(selection.extra_details.as_deref(), Some("  keep the spaces  "));
    }

    #[test]
    fn test_selection_deserializes_from_camel_case() {
        let json = r#"{
            "mode": "guided",
            "occasion": "Diwali",
            "persona": "Girlfriend",
            "age": "18-25",
            "interests": ["Music", "Beauty"],
            "priceRange": "2000–3000"
        }"#;
        let selection: FilterSelection = serde_json::from_str(json).unwrap();
        assert_eq!(selection.occasion, Some(Occasion::Diwali));
        assert_eq!(selection.age, Some(AgeRange::YoungAdult));
        assert_eq!(selection.gender, Gender::PreferNotToSay);
        assert_eq!(selection.interests.as_slice(), &[Interest::Music, Interest::Beauty]);
        assert_eq!(selection.price_range, Some(PriceRange::From2000To3000));
    }

    #[test]
    fn test_interest_set_rejects_more_than_four_on_deserialize() {
        let json = r#"["Music", "Beauty", "Food", "Drink", "Pets"]"#;
        assert!(serde_json::from_str::<InterestSet>(json).is_err());
    }

    #[test]
    fn test_filter_mode_wire_name_matches_display() {
        for mode in [FilterMode::Guided, FilterMode::Direct] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{mode}\""));
            assert_eq!(serde_json::from_str::<FilterMode>(&json).unwrap(), mode);
        }
    }
}
