//! Non-interactive request builder (`giftly message`).
//!
//! Feeds the flags through the same wizard state machine the interactive
//! wizard uses, so required steps are enforced identically.

use anyhow::{Result, bail};
use console::style;

use giftly_core::wizard::state::{GuidedWizard, Transition};
use giftly_core::wizard::step::WizardStep;
use giftly_types::error::WizardError;
use giftly_types::filter::FilterMode;

use super::MessageArgs;

/// Flag that satisfies a required wizard step.
fn flag_for(step: WizardStep) -> &'static str {
    match step {
        WizardStep::Occasion => "--occasion",
        WizardStep::Persona => "--persona",
        WizardStep::Age => "--age",
        WizardStep::Budget => "--budget",
        _ => "",
    }
}

/// Drive a wizard to completion from the given flags.
pub fn build_from_args(args: &MessageArgs) -> Result<String> {
    let mut wizard = GuidedWizard::new();

    if let Some(direct) = &args.direct {
        wizard.set_mode(FilterMode::Direct);
        wizard.set_direct_prompt(direct);
        return match wizard.submit_direct() {
            Ok(message) => Ok(message),
            Err(WizardError::StepIncomplete(_)) => bail!("--direct request cannot be empty"),
            Err(err) => Err(err.into()),
        };
    }

    if let Some(occasion) = args.occasion {
        wizard.select_occasion(occasion);
    }
    if let Some(persona) = args.persona {
        wizard.select_persona(persona);
    }
    if let Some(age) = args.age {
        wizard.select_age(age);
    }
    if let Some(gender) = args.gender {
        wizard.select_gender(gender);
    }
    for interest in &args.interests {
        if wizard.selection().interests.contains(*interest) {
            continue;
        }
        wizard.toggle_interest(*interest)?;
    }
    if let Some(range) = args.budget {
        wizard.select_price_range(range);
    }
    if let Some(details) = &args.details {
        wizard.set_extra_details(details);
    }

    loop {
        match wizard.advance() {
            Ok(Transition::Moved(_)) => continue,
            Ok(Transition::Completed(message)) => return Ok(message),
            Err(WizardError::StepIncomplete(number)) => {
                let step = WizardStep::from_number(number).unwrap_or(WizardStep::FIRST);
                bail!("{} is required (pass {})", step.title(), flag_for(step));
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Print the message built from flags.
pub fn run(args: &MessageArgs, json: bool) -> Result<()> {
    let message = build_from_args(args)?;
    let mode = if args.direct.is_some() { FilterMode::Direct } else { FilterMode::Guided };

    if json {
        let out = serde_json::json!({
            "mode": mode.to_string(),
            "message": message,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!();
        println!("  {} {}", style("→").cyan().bold(), style(&message).bold());
        println!();
    }

    Ok(())
}
