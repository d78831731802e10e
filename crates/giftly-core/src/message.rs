//! Message builder.
//!
//! Turns a [`FilterSelection`] into the single natural-language request that
//! is handed to the shopping assistant, e.g.
//! `"Diwali for girlfriend (age 18–25, female) interested in music,beauty — budget 2000–3000"`.
//!
//! Everything here is pure: the selection is only borrowed and the same input
//! always produces the same output.

use giftly_types::catalog::Gender;
use giftly_types::filter::{FilterMode, FilterSelection};

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the final request string for a selection.
///
/// In direct mode only the direct prompt is used (whitespace-normalized);
/// guided fields are ignored even if populated, and a missing or blank
/// prompt yields an empty string. In guided mode each populated field
/// contributes one fragment, in fixed order, joined by single spaces.
pub fn build_message(selection: &FilterSelection) -> String {
    if selection.mode == FilterMode::Direct {
        return selection
            .direct_prompt
            .as_deref()
            .map(normalize_whitespace)
            .unwrap_or_default();
    }

    guided_fragments(selection).join(" ")
}

fn guided_fragments(selection: &FilterSelection) -> Vec<String> {
    let mut parts = Vec::new();

    if let Some(occasion) = selection.occasion {
        parts.push(occasion.label().to_string());
    }

    if let Some(persona) = selection.persona {
        parts.push(format!("for {}", persona.label().to_lowercase()));
    }

    if let Some(age) = selection.age {
        let clause = match selection.gender {
            Gender::PreferNotToSay => format!("age {age}"),
            gender => format!("age {age}, {}", gender.label().to_lowercase()),
        };
        parts.push(format!("({clause})"));
    }

    if !selection.interests.is_empty() {
        let interests = selection
            .interests
            .iter()
            .map(|i| i.label().to_lowercase())
            .collect::<Vec<_>>()
            .join(",");
        parts.push(format!("interested in {interests}"));
    }

    if let Some(range) = selection.price_range {
        parts.push(format!("\u{2014} budget {range}"));
    }

    if let Some(details) = selection.extra_details.as_deref().map(str::trim) {
        if !details.is_empty() {
            parts.push(format!("\u{2014} {details}"));
        }
    }

    parts
}

/// One labelled line of the review screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub label: &'static str,
    pub value: String,
}

/// The populated fields of a guided selection, as shown on the review step.
///
/// Empty fields are omitted. Gender always appears since it always has a
/// value. The budget carries a rupee prefix; interests keep their original
/// case and are joined with ", ".
pub fn review_items(selection: &FilterSelection) -> Vec<ReviewItem> {
    let mut items = Vec::new();
    let mut push = |label: &'static str, value: Option<String>| {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            items.push(ReviewItem { label, value });
        }
    };

    push("Occasion", selection.occasion.map(|o| o.to_string()));
    push("For Whom", selection.persona.map(|p| p.to_string()));
    push("Age", selection.age.map(|a| a.to_string()));
    push("Gender", Some(selection.gender.to_string()));
    push(
        "Interests",
        Some(
            selection
                .interests
                .iter()
                .map(|i| i.label())
                .collect::<Vec<_>>()
                .join(", "),
        ),
    );
    push("Budget", selection.price_range.map(|r| format!("\u{20b9}{r}")));
    push("Extra Details", selection.extra_details.clone());

    items
}
