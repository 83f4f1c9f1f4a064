//! Error handling and display for the CLI.

use std::path::PathBuf;

use colored::Colorize;
use crew_reconcile::ReconcileError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Roster file not found: {}", .0.display())]
    RosterNotFound(PathBuf),

    #[error("People directory not found: {}", .0.display())]
    PeopleDirNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ReconcileError),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::RosterNotFound(_) => {
                eprintln!(
                    "\n{}",
                    "Hint: Commit a roster containing `{ \"teams\": [] }` or pass --roster.".yellow()
                );
            }
            CliError::PeopleDirNotFound(_) => {
                eprintln!(
                    "\n{}",
                    "Hint: Check --workspace / GITHUB_WORKSPACE and --people-dir.".yellow()
                );
            }
            CliError::Config(e) if e.is_config_error() => {
                eprintln!(
                    "\n{}",
                    "Hint: Set CREW_TEAM_SIZE and CREW_MAX_ATTEMPTS to positive integers.".yellow()
                );
            }
            _ => {}
        }
    }
}
