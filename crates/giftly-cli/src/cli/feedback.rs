//! Product feedback dialog (`giftly feedback`, `giftly product --feedback`).
//!
//! With `--rating` the form is filled from flags and sent once. Without it
//! the dialog is interactive: stars, up to three reason chips, an optional
//! custom reason, category, query and details. A failed send keeps every
//! entered value and offers to try again.

use anyhow::{Result, bail};
use console::style;
use dialoguer::{Confirm, Input, Select};

use giftly_core::feedback::dialog::{FeedbackDialog, Notice};
use giftly_core::feedback::form::FeedbackForm;
use giftly_core::feedback::submitter::FeedbackSubmitter;
use giftly_types::feedback::{FeedbackCategory, FeedbackReason, FeedbackTarget, MAX_REASONS, Rating};

use super::FeedbackArgs;
use crate::state::AppState;

/// Entry point for `giftly feedback`.
pub async fn send_feedback(state: &AppState, args: FeedbackArgs, json: bool) -> Result<()> {
    let target = FeedbackTarget {
        session_id: args.session_id.clone(),
        message_id: args.message_id.clone(),
        product_id: args.product_id.clone(),
        product_title: args.title.clone().unwrap_or_else(|| args.product_id.clone()),
    };
    let mut dialog = FeedbackDialog::open(target, args.query.as_deref(), state.feedback_submitter()?);

    if args.rating.is_some() {
        apply_args(dialog.form_mut(), &args)?;
        let outcome = dialog.submit().await;
        print_notice(&dialog, json)?;
        outcome?;
        return Ok(());
    }

    run_interactive(&mut dialog, json).await
}

/// Open the interactive dialog for a product card's target.
pub async fn open_for_card(state: &AppState, target: FeedbackTarget, json: bool) -> Result<()> {
    let mut dialog = FeedbackDialog::open(target, None, state.feedback_submitter()?);
    run_interactive(&mut dialog, json).await
}

/// Copy flag values into the form.
fn apply_args(form: &mut FeedbackForm, args: &FeedbackArgs) -> Result<()> {
    if let Some(stars) = args.rating {
        form.set_rating(stars)?;
    }
    for reason in &args.reasons {
        if form.reasons().contains(reason) {
            continue;
        }
        form.toggle_reason(*reason)?;
    }
    if let Some(custom) = &args.custom_reason {
        form.set_custom_reason(custom);
    }
    form.set_category(args.category);
    if let Some(details) = &args.details {
        form.set_more_details(details);
    }
    Ok(())
}

async fn run_interactive<S: FeedbackSubmitter>(dialog: &mut FeedbackDialog<S>, json: bool) -> Result<()> {
    println!();
    println!(
        "  {} Feedback for {}",
        style("*").cyan().bold(),
        style(dialog.display_title()).yellow()
    );
    println!();

    fill_interactively(dialog.form_mut())?;
    if !dialog.form().can_submit() {
        bail!("feedback was not submitted: a rating is required");
    }

    loop {
        let outcome = dialog.submit().await;
        print_notice(dialog, json)?;

        match outcome {
            Ok(()) => return Ok(()),
            Err(err) => {
                tracing::debug!(error = %err, "Feedback dialog submission failed");
                let retry = Confirm::new()
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    dialog.cancel();
                    bail!("feedback was not submitted: {err}");
                }
            }
        }
    }
}

fn stars(rating: u8) -> String {
    let filled = "\u{2605}".repeat(usize::from(rating));
    let empty = "\u{2606}".repeat(usize::from(Rating::MAX - rating));
    format!("{filled}{empty}")
}

fn fill_interactively(form: &mut FeedbackForm) -> Result<()> {
    // Rating (required)
    let ratings: Vec<String> = (Rating::MIN..=Rating::MAX)
        .map(|n| format!("{} {n}/5", stars(n)))
        .collect();
    let picked = Select::new()
        .with_prompt("Rating")
        .items(&ratings)
        .default(ratings.len() - 1)
        .interact()?;
    // Index is within 0..5, so the star count is always valid.
    form.set_rating(Rating::MIN + picked as u8)?;

    pick_reasons(form)?;

    // Custom reason
    let add_custom = Confirm::new()
        .with_prompt("Add a custom reason?")
        .default(form.shows_custom_reason())
        .interact()?;
    show_custom_reason(form, add_custom);
    if form.shows_custom_reason() {
        let text: String = Input::new()
            .with_prompt("Custom reason")
            .with_initial_text(form.custom_reason())
            .allow_empty(true)
            .interact_text()?;
        form.set_custom_reason(&text);
    }

    // Category
    let mut categories = vec!["(none)".to_string()];
    categories.extend(FeedbackCategory::ALL.iter().map(|c| c.label().to_string()));
    let picked = Select::new()
        .with_prompt("Category")
        .items(&categories)
        .default(0)
        .interact()?;
    form.set_category(picked.checked_sub(1).and_then(|i| FeedbackCategory::ALL.get(i).copied()));

    // Original query: read-only when supplied by the caller
    if form.is_query_locked() {
        println!("  {} {}", style("Query:").dim(), form.user_query());
    } else {
        let text: String = Input::new()
            .with_prompt("What were you searching for?")
            .allow_empty(true)
            .interact_text()?;
        form.set_user_query(&text);
    }

    let details: String = Input::new()
        .with_prompt("More details")
        .allow_empty(true)
        .interact_text()?;
    form.set_more_details(&details);

    Ok(())
}

/// Bring the custom reason field to the requested visibility.
fn show_custom_reason(form: &mut FeedbackForm, visible: bool) {
    if form.shows_custom_reason() != visible {
        form.toggle_custom_reason();
    }
}

/// Toggle loop over the reason chips; chips are disabled at the limit.
fn pick_reasons(form: &mut FeedbackForm) -> Result<()> {
    loop {
        let mut items: Vec<String> = FeedbackReason::ALL
            .iter()
            .map(|r| {
                if form.reasons().contains(r) {
                    format!("[x] {}", r.label())
                } else if form.can_toggle_reason(*r) {
                    format!("[ ] {}", r.label())
                } else {
                    format!("{}", style(format!("[-] {}", r.label())).dim())
                }
            })
            .collect();
        items.push(format!("Done ({}/{MAX_REASONS} selected)", form.reasons().len()));

        let picked = Select::new()
            .with_prompt("Reasons (optional, up to three)")
            .items(&items)
            .default(items.len() - 1)
            .interact()?;

        match FeedbackReason::ALL.get(picked) {
            Some(reason) => {
                if let Err(err) = form.toggle_reason(*reason) {
                    println!("  {} {err}", style("!").yellow().bold());
                }
            }
            None => return Ok(()),
        }
    }
}

fn print_notice<S: FeedbackSubmitter>(dialog: &FeedbackDialog<S>, json: bool) -> Result<()> {
    let Some(notice) = dialog.notice() else {
        // Local validation failure: no request was made.
        if let Some(error) = dialog.error() {
            if json {
                let out = serde_json::json!({ "submitted": false, "error": error });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("  {} {}", style("\u{2717}").red().bold(), error);
            }
        }
        return Ok(());
    };

    if json {
        let (submitted, message) = match notice {
            Notice::Success(m) => (true, m),
            Notice::Error(m) => (false, m),
        };
        let out = serde_json::json!({
            "submitted": submitted,
            "message": message,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    match notice {
        Notice::Success(m) => println!("  {} {}", style("\u{2713}").green().bold(), m),
        Notice::Error(m) => println!("  {} {}", style("\u{2717}").red().bold(), m),
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use giftly_types::feedback::ReasonValue;

    use super::*;

    fn form() -> FeedbackForm {
        FeedbackForm::new(FeedbackTarget {
            session_id: "s".to_string(),
            message_id: "m".to_string(),
            product_id: "p".to_string(),
            product_title: "Mug".to_string(),
        })
    }

    #[test]
    fn flags_fill_the_payload() {
        let args = FeedbackArgs {
            rating: Some(2),
            reasons: vec![FeedbackReason::PriceMismatch, FeedbackReason::PriceMismatch],
            custom_reason: Some("  too pricey ".to_string()),
            category: Some(FeedbackCategory::Price),
            details: Some("saw it cheaper".to_string()),
            ..FeedbackArgs::default()
        };
        let mut form = form();
        apply_args(&mut form, &args).unwrap();

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.rating.stars(), 2);
        assert_eq!(payload.reason, Some(ReasonValue::One(FeedbackReason::PriceMismatch)));
        assert_eq!(payload.reason_text.as_deref(), Some("too pricey saw it cheaper"));
        assert_eq!(payload.feedback_type, Some(FeedbackCategory::Price));
    }

    #[test]
    fn a_fourth_reason_is_rejected() {
        let args = FeedbackArgs {
            rating: Some(4),
            reasons: vec![
                FeedbackReason::NotRelevant,
                FeedbackReason::PoorImage,
                FeedbackReason::Unavailable,
                FeedbackReason::StyleMismatch,
            ],
            ..FeedbackArgs::default()
        };
        assert!(apply_args(&mut form(), &args).is_err());
    }

    #[test]
    fn custom_reason_visibility_follows_answer() {
        let mut form = form();
        show_custom_reason(&mut form, false);
        assert!(!form.shows_custom_reason());

        show_custom_reason(&mut form, true);
        assert!(form.shows_custom_reason());
        show_custom_reason(&mut form, true);
        assert!(form.shows_custom_reason());

        form.set_custom_reason("chipped rim");
        show_custom_reason(&mut form, false);
        assert!(!form.shows_custom_reason());
        assert_eq!(form.custom_reason(), "chipped rim");
    }

    #[test]
    fn unrated_form_cannot_submit() {
        let mut form = form();
        assert!(!form.can_submit());
        apply_args(&mut form, &FeedbackArgs { rating: Some(5), ..FeedbackArgs::default() }).unwrap();
        assert!(form.can_submit());
    }

    #[test]
    fn star_strip_has_five_glyphs() {
        assert_eq!(stars(1), "\u{2605}\u{2606}\u{2606}\u{2606}\u{2606}");
        assert_eq!(stars(5).chars().count(), 5);
    }
}
