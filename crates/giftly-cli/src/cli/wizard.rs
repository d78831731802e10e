//! Interactive gift-finder wizard (`giftly wizard`).
//!
//! Renders each step of a [`GuidedWizard`] with dialoguer: single-choice
//! steps as an arrow-key Select, interests as a toggle list, extra details
//! and direct requests as free text. Every screen also offers "< Back" and a
//! mode switch. The final message is printed by the completion callback.

use anyhow::Result;
use console::style;
use dialoguer::{Input, Select};
use uuid::Uuid;

use giftly_core::message::review_items;
use giftly_core::wizard::state::{GuidedWizard, Transition};
use giftly_core::wizard::step::WizardStep;
use giftly_types::catalog::{AgeRange, ClosedSet, Gender, Interest, Occasion, Persona, PriceRange};
use giftly_types::filter::{FilterMode, MAX_INTERESTS};

const BACK: &str = "< Back";

/// What the user picked on a single-choice screen.
enum Choice<T> {
    Picked(T),
    Back,
    SwitchMode,
}

fn switch_label(mode: FilterMode) -> &'static str {
    match mode {
        FilterMode::Guided => "Switch to direct request",
        FilterMode::Direct => "Switch to guided wizard",
    }
}

fn other_mode(mode: FilterMode) -> FilterMode {
    match mode {
        FilterMode::Guided => FilterMode::Direct,
        FilterMode::Direct => FilterMode::Guided,
    }
}

/// Run the wizard until it completes.
pub fn run_wizard(direct: bool, json: bool) -> Result<()> {
    let wizard = GuidedWizard::new();
    let session_id = wizard.session_id();
    let mut wizard = wizard.on_complete(move |message| print_message(session_id, message, json));

    if direct {
        wizard.set_mode(FilterMode::Direct);
    }

    println!();
    println!("  {} Let's find the right gift", style("*").cyan().bold());

    while !wizard.is_completed() {
        match wizard.mode() {
            FilterMode::Guided => guided_turn(&mut wizard)?,
            FilterMode::Direct => direct_turn(&mut wizard)?,
        }
    }

    Ok(())
}

fn print_message(session_id: Uuid, message: &str, json: bool) {
    if json {
        let out = serde_json::json!({
            "session_id": session_id.to_string(),
            "message": message,
        });
        if let Ok(text) = serde_json::to_string_pretty(&out) {
            println!("{text}");
        }
    } else {
        println!();
        println!("  {} {}", style("\u{2192}").green().bold(), style(message).bold());
        println!();
    }
}

// ---------------------------------------------------------------------------
// Guided mode
// ---------------------------------------------------------------------------

fn guided_turn(wizard: &mut GuidedWizard) -> Result<()> {
    let step = wizard.step();
    let (number, total) = wizard.progress();
    println!();
    println!(
        "  {} {}",
        style(format!("Step {number} of {total}")).dim(),
        style(step_heading(step)).cyan().bold()
    );

    let selection = wizard.selection();
    let choice = match step {
        WizardStep::Occasion => choose_one(step, selection.occasion, Occasion::label)?.map(|v| {
            wizard.select_occasion(v);
        }),
        WizardStep::Persona => choose_one(step, selection.persona, Persona::label)?.map(|v| {
            wizard.select_persona(v);
        }),
        WizardStep::Age => choose_one(step, selection.age, AgeRange::label)?.map(|v| {
            wizard.select_age(v);
        }),
        WizardStep::Gender => choose_one(step, Some(selection.gender), Gender::label)?.map(|v| {
            wizard.select_gender(v);
        }),
        WizardStep::Budget => {
            choose_one(step, selection.price_range, |r: PriceRange| format!("\u{20b9}{}", r.label()))?.map(|v| {
                wizard.select_price_range(v);
            })
        }
        WizardStep::Interests => pick_interests(wizard)?,
        WizardStep::ExtraDetails => enter_extra_details(wizard)?,
        WizardStep::Review => review(wizard)?,
    };

    match choice {
        Choice::Picked(()) => match wizard.advance() {
            Ok(Transition::Moved(next)) => tracing::debug!(step = %next, "Wizard moved"),
            Ok(Transition::Completed(_)) => {}
            Err(err) => println!("  {} {err}", style("!").yellow().bold()),
        },
        Choice::Back => {
            wizard.retreat();
        }
        Choice::SwitchMode => wizard.set_mode(other_mode(wizard.mode())),
    }

    Ok(())
}

/// Step title, marked when the step can be skipped. Review is never marked.
fn step_heading(step: WizardStep) -> String {
    if step.is_optional() && step.next().is_some() {
        format!("{} (optional)", step.title())
    } else {
        step.title().to_string()
    }
}

impl<T> Choice<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> Choice<U> {
        match self {
            Choice::Picked(v) => Choice::Picked(f(v)),
            Choice::Back => Choice::Back,
            Choice::SwitchMode => Choice::SwitchMode,
        }
    }
}

/// Trailing navigation entries for a step.
fn nav_items(step: WizardStep) -> Vec<String> {
    let mut items = Vec::new();
    if step.previous().is_some() {
        items.push(BACK.to_string());
    }
    items.push(switch_label(FilterMode::Guided).to_string());
    items
}

/// Resolve a picked index past the choice list into a navigation action.
fn nav_choice<T>(step: WizardStep, offset: usize) -> Choice<T> {
    if step.previous().is_some() && offset == 0 {
        Choice::Back
    } else {
        Choice::SwitchMode
    }
}

/// Single-choice screen over a closed set. The current value is preselected.
fn choose_one<T, L>(step: WizardStep, current: Option<T>, label: impl Fn(T) -> L) -> Result<Choice<T>>
where
    T: ClosedSet,
    L: std::fmt::Display,
{
    let options = T::all();
    let mut items: Vec<String> = options
        .iter()
        .map(|v| {
            if Some(*v) == current {
                format!("{} {}", label(*v), style("(selected)").dim())
            } else {
                label(*v).to_string()
            }
        })
        .collect();
    items.extend(nav_items(step));

    let default = current
        .and_then(|c| options.iter().position(|v| *v == c))
        .unwrap_or(0);

    let picked = Select::new()
        .with_prompt(step.prompt())
        .items(&items)
        .default(default)
        .interact()?;

    Ok(match options.get(picked) {
        Some(value) => Choice::Picked(*value),
        None => nav_choice(step, picked - options.len()),
    })
}

/// Toggle list for interests. Unselected chips are disabled at the limit.
fn pick_interests(wizard: &mut GuidedWizard) -> Result<Choice<()>> {
    let step = WizardStep::Interests;
    loop {
        let interests = &wizard.selection().interests;
        let mut items: Vec<String> = Interest::ALL
            .iter()
            .map(|i| {
                if interests.contains(*i) {
                    format!("[x] {}", i.label())
                } else if wizard.can_select_interest(*i) {
                    format!("[ ] {}", i.label())
                } else {
                    format!("{}", style(format!("[-] {}", i.label())).dim())
                }
            })
            .collect();
        items.push(format!("Continue ({}/{MAX_INTERESTS} selected)", interests.len()));
        items.extend(nav_items(step));

        let picked = Select::new()
            .with_prompt(format!("{} (up to {MAX_INTERESTS})", step.prompt()))
            .items(&items)
            .default(Interest::ALL.len())
            .interact()?;

        match Interest::ALL.get(picked) {
            Some(interest) => {
                if let Err(err) = wizard.toggle_interest(*interest) {
                    println!("  {} {err}", style("!").yellow().bold());
                }
            }
            None if picked == Interest::ALL.len() => return Ok(Choice::Picked(())),
            None => return Ok(nav_choice(step, picked - Interest::ALL.len() - 1)),
        }
    }
}

fn enter_extra_details(wizard: &mut GuidedWizard) -> Result<Choice<()>> {
    let current = wizard.selection().extra_details.clone().unwrap_or_default();
    println!("  {}", style("Enter to skip, '<' to go back, '/' to switch mode").dim());

    let text: String = Input::new()
        .with_prompt(WizardStep::ExtraDetails.prompt())
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;

    Ok(match text.trim() {
        "<" => Choice::Back,
        "/" => Choice::SwitchMode,
        _ => {
            wizard.set_extra_details(&text);
            Choice::Picked(())
        }
    })
}

fn review(wizard: &GuidedWizard) -> Result<Choice<()>> {
    println!();
    for item in review_items(wizard.selection()) {
        println!("  {:<14} {}", style(item.label).dim(), item.value);
    }
    println!();
    println!("  {} {}", style("Request:").dim(), style(wizard.preview_message()).yellow());
    println!();

    let mut items = vec!["Start Shopping".to_string()];
    items.extend(nav_items(WizardStep::Review));

    let picked = Select::new().items(&items).default(0).interact()?;
    Ok(match picked {
        0 => Choice::Picked(()),
        n => nav_choice(WizardStep::Review, n - 1),
    })
}

// ---------------------------------------------------------------------------
// Direct mode
// ---------------------------------------------------------------------------

fn direct_turn(wizard: &mut GuidedWizard) -> Result<()> {
    println!();
    println!("  {}", style("Describe what you're looking for").cyan().bold());

    let current = wizard.selection().direct_prompt.clone().unwrap_or_default();
    let text: String = Input::new()
        .with_prompt("Request")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    wizard.set_direct_prompt(&text);

    if wizard.can_proceed() {
        wizard.submit_direct()?;
        return Ok(());
    }

    println!("  {} Please describe the gift you need.", style("!").yellow().bold());
    let items = ["Try again", switch_label(FilterMode::Direct)];
    let picked = Select::new().items(&items).default(0).interact()?;
    if picked == 1 {
        wizard.set_mode(FilterMode::Guided);
    }
    Ok(())
}
