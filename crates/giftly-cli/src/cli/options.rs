//! `giftly options` -- list the fixed choice sets.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use giftly_types::catalog::{AgeRange, ClosedSet, Gender, Interest, Occasion, Persona, PriceRange};
use giftly_types::feedback::{FeedbackCategory, FeedbackReason};

use super::OptionSet;

/// `(label, value accepted on the command line)` for every member of `T`.
fn entries<T: ClosedSet>() -> Vec<(&'static str, String)> {
    T::all().iter().map(|v| (v.label(), v.to_string())).collect()
}

fn entries_for(set: OptionSet) -> (&'static str, Vec<(&'static str, String)>) {
    match set {
        OptionSet::Occasions => (Occasion::KIND, entries::<Occasion>()),
        OptionSet::Personas => (Persona::KIND, entries::<Persona>()),
        OptionSet::Ages => (AgeRange::KIND, entries::<AgeRange>()),
        OptionSet::Genders => (Gender::KIND, entries::<Gender>()),
        OptionSet::Interests => (Interest::KIND, entries::<Interest>()),
        OptionSet::Budgets => (PriceRange::KIND, entries::<PriceRange>()),
        OptionSet::Reasons => (FeedbackReason::KIND, entries::<FeedbackReason>()),
        OptionSet::Categories => (FeedbackCategory::KIND, entries::<FeedbackCategory>()),
    }
}

/// Print one closed set as a table (or JSON array).
pub fn list_options(set: OptionSet, json: bool) -> Result<()> {
    let (kind, entries) = entries_for(set);

    if json {
        let out: Vec<_> = entries
            .iter()
            .map(|(label, value)| serde_json::json!({ "label": label, "value": value }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Label").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    for (i, (label, value)) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).fg(Color::DarkGrey),
            Cell::new(label).fg(Color::Cyan),
            Cell::new(value),
        ]);
    }

    println!();
    println!("  {} {} choices", style(entries.len()).bold(), kind);
    println!();
    println!("{table}");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_set_lists_its_members_in_order() {
        assert_eq!(entries_for(OptionSet::Occasions).1.len(), 21);
        assert_eq!(entries_for(OptionSet::Personas).1.len(), 20);
        assert_eq!(entries_for(OptionSet::Ages).1.len(), 8);
        assert_eq!(entries_for(OptionSet::Genders).1.len(), 4);
        assert_eq!(entries_for(OptionSet::Interests).1.len(), 24);
        assert_eq!(entries_for(OptionSet::Budgets).1.len(), 9);
        assert_eq!(entries_for(OptionSet::Reasons).1.len(), 10);
        assert_eq!(entries_for(OptionSet::Categories).1.len(), 8);

        let (_, ages) = entries_for(OptionSet::Ages);
        assert_eq!(ages.first().map(|e| e.0), Some("0\u{2013}2"));
        assert_eq!(ages.last().map(|e| e.0), Some("60+"));
    }

    #[test]
    fn category_value_is_the_wire_value() {
        let (_, categories) = entries_for(OptionSet::Categories);
        assert_eq!(categories[0], ("Relevance", "relevance".to_string()));
    }
}
