//! Giftly CLI entry point.
//!
//! Binary name: `giftly`
//!
//! Parses CLI arguments, initializes tracing and configuration, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use giftly_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "giftly", &mut std::io::stdout());
        return Ok(());
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init(cli.api_base.clone()).await?;

    match cli.command {
        Commands::Wizard { direct } => {
            cli::wizard::run_wizard(direct, cli.json)?;
        }

        Commands::Message(args) => {
            cli::message::run(&args, cli.json)?;
        }

        Commands::Options { set } => {
            cli::options::list_options(set, cli.json)?;
        }

        Commands::Product {
            file,
            session_id,
            message_id,
            feedback,
        } => {
            cli::product::show_product(
                &state,
                &file,
                session_id.as_deref(),
                message_id.as_deref(),
                feedback,
                cli.json,
            )
            .await?;
        }

        Commands::Feedback(args) => {
            cli::feedback::send_feedback(&state, args, cli.json).await?;
        }

        // Handled before state init
        Commands::Completions { .. } => {}
    }

    Ok(())
}
