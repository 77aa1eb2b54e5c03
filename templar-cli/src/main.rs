//! Templar — policy-as-code reconciliation for access-control templates.
//!
//! # Usage
//!
//! ```text
//! templar plan [--repo <path>] [--from <rev>] [--to <rev>] [--allow-dirty]
//!              [--config <file>] [--diff]
//! templar validate [--repo <path>]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{plan::PlanArgs, validate::ValidateArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "templar",
    version,
    about = "Reconcile declared access-control templates against repository history",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify template changes in a revision range and print the plan.
    Plan(PlanArgs),

    /// Parse every managed template in the repository and report errors.
    Validate(ValidateArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Plan(args) => args.run(),
        Commands::Validate(args) => args.run(),
    }
}
