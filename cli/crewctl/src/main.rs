//! crew - team roster automation for the onboarding repository.
//!
//! Reconciles the persisted roster against the people directory and emits a
//! commit message describing what changed, for the workflow to commit.

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;
mod error;
mod github;
mod output;
mod source;
mod store;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_tracing();

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
