//! CLI commands.

mod reconcile;
mod show;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Paths, DEFAULT_PEOPLE_DIR, DEFAULT_ROSTER_PATH};
use crate::output::OutputFormat;

/// crew - keep the onboarding team roster in step with the people directory.
#[derive(Debug, Parser)]
#[command(name = "crew")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Repository checkout that relative paths are resolved against.
    #[arg(long, global = true, env = "GITHUB_WORKSPACE", default_value = ".")]
    workspace: PathBuf,

    /// Roster document.
    #[arg(long, global = true, env = "CREW_ROSTER_PATH", default_value = DEFAULT_ROSTER_PATH)]
    roster: PathBuf,

    /// Directory with one entry per participant.
    #[arg(long, global = true, env = "CREW_PEOPLE_DIR", default_value = DEFAULT_PEOPLE_DIR)]
    people_dir: PathBuf,

    /// Log level used when RUST_LOG is unset.
    #[arg(long, global = true, env = "CREW_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Remove orphans, place newcomers, and persist the roster.
    Reconcile(reconcile::ReconcileCommand),

    /// Show the persisted roster.
    Show(show::ShowCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Initialize logging. Logs go to stderr so stdout stays usable.
    pub fn init_tracing(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| self.log_level.clone().into());
        let registry = tracing_subscriber::registry().with(filter);

        if self.log_json {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let ctx = CommandContext {
            paths: Paths::resolve(&self.workspace, &self.roster, &self.people_dir),
            format: OutputFormat::parse(&self.format),
        };

        match self.command {
            Commands::Reconcile(cmd) => cmd.run(&ctx),
            Commands::Show(cmd) => cmd.run(&ctx),
            Commands::Version => {
                println!("crew {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub paths: Paths,
    pub format: OutputFormat,
}
