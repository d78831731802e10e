//! CLI command definitions and dispatch for the `giftly` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod feedback;
pub mod message;
pub mod options;
pub mod product;
pub mod wizard;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use giftly_types::catalog::{AgeRange, Gender, Interest, Occasion, Persona, PriceRange};
use giftly_types::feedback::{FeedbackCategory, FeedbackReason};

/// Find the right gift: guided wizard, request builder and product feedback.
#[derive(Parser)]
#[command(name = "giftly", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Base URL of the shopping API (overrides config.toml and GIFTLY_API_BASE).
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive gift-finder wizard.
    Wizard {
        /// Start in direct mode (one free-text request).
        #[arg(long)]
        direct: bool,
    },

    /// Build the request message from flags, without prompts.
    #[command(alias = "msg")]
    Message(MessageArgs),

    /// List the fixed choices offered by the wizard and feedback dialog.
    #[command(alias = "ls")]
    Options {
        /// Which set to list.
        set: OptionSet,
    },

    /// Render a product card from a JSON product record.
    Product {
        /// Path to the product JSON file.
        file: PathBuf,

        /// Chat session the product was recommended in.
        #[arg(long)]
        session_id: Option<String>,

        /// Assistant message the product was recommended in.
        #[arg(long)]
        message_id: Option<String>,

        /// Open the feedback dialog for this product after rendering it.
        #[arg(long)]
        feedback: bool,
    },

    /// Send feedback about a recommended product.
    Feedback(FeedbackArgs),

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

#[derive(Args, Debug, Default)]
pub struct MessageArgs {
    /// Occasion (e.g. "Diwali", "Secret Santa").
    #[arg(long)]
    pub occasion: Option<Occasion>,

    /// Who the gift is for (e.g. "Girlfriend", "Co-worker").
    #[arg(long)]
    pub persona: Option<Persona>,

    /// Age range (e.g. "18-25", "60+").
    #[arg(long)]
    pub age: Option<AgeRange>,

    /// Gender of the recipient.
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Interest, repeatable up to four times.
    #[arg(long = "interest")]
    pub interests: Vec<Interest>,

    /// Budget range in rupees (e.g. "2000-3000", "5100+").
    #[arg(long)]
    pub budget: Option<PriceRange>,

    /// Extra details (up to 140 characters).
    #[arg(long)]
    pub details: Option<String>,

    /// Free-text request; switches to direct mode and ignores the other flags.
    #[arg(long, conflicts_with_all = ["occasion", "persona", "age", "gender", "interests", "budget", "details"])]
    pub direct: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct FeedbackArgs {
    /// Chat session identifier.
    #[arg(long)]
    pub session_id: String,

    /// Assistant message identifier.
    #[arg(long)]
    pub message_id: String,

    /// Product identifier.
    #[arg(long)]
    pub product_id: String,

    /// Product title shown in the dialog header.
    #[arg(long)]
    pub title: Option<String>,

    /// Original search/request; pre-filled and read-only when given.
    #[arg(long)]
    pub query: Option<String>,

    /// Star rating 1-5. When given, no prompts are shown.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: Option<u8>,

    /// Predefined reason, repeatable up to three times.
    #[arg(long = "reason")]
    pub reasons: Vec<FeedbackReason>,

    /// Custom reason (up to 200 characters).
    #[arg(long)]
    pub custom_reason: Option<String>,

    /// Feedback category.
    #[arg(long)]
    pub category: Option<FeedbackCategory>,

    /// Additional details (up to 1000 characters).
    #[arg(long)]
    pub details: Option<String>,
}

/// Closed sets that `giftly options` can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionSet {
    Occasions,
    Personas,
    Ages,
    Genders,
    Interests,
    Budgets,
    Reasons,
    Categories,
}
