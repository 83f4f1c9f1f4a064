//! Run configuration.
//!
//! Every input is a flag backed by an environment variable so the same binary
//! works from a workflow step and from a local checkout:
//! - Paths to the roster document and the people directory
//! - Team capacity and the expected head count
//! - The reserved automation identifier excluded from the people listing

use std::path::{Path, PathBuf};

use clap::Args;
use crew_reconcile::{ReconcileConfig, DEFAULT_MAX_PLACEMENT_ATTEMPTS, DEFAULT_ROSTER_FILE_NAME};

use crate::error::CliError;

/// Roster location relative to the workspace.
pub const DEFAULT_ROSTER_PATH: &str = "public/resources/teams.json";

/// People directory relative to the workspace.
pub const DEFAULT_PEOPLE_DIR: &str = "people";

/// Identifier of the automation actor; never a participant.
pub const DEFAULT_BOT_NAME: &str = "github-actions[bot]";

/// Resolved file locations for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub roster: PathBuf,
    pub people_dir: PathBuf,
}

impl Paths {
    /// Resolve paths against the workspace. Absolute paths are kept as is.
    pub fn resolve(workspace: &Path, roster: &Path, people_dir: &Path) -> Self {
        Self {
            roster: workspace.join(roster),
            people_dir: workspace.join(people_dir),
        }
    }

    /// File name of the roster, as named in commit messages.
    pub fn roster_file_name(&self) -> String {
        self.roster
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_ROSTER_FILE_NAME)
            .to_string()
    }
}

/// Settings for a reconciliation run.
#[derive(Debug, Clone, Args)]
pub struct ReconcileSettings {
    /// Maximum number of participants per team.
    #[arg(long, env = "CREW_TEAM_SIZE")]
    pub team_size: usize,

    /// Expected number of participants; the team count is total_people / team_size.
    #[arg(long, env = "CREW_TOTAL_PEOPLE")]
    pub total_people: usize,

    /// Random placement attempts per participant before giving up for this run.
    #[arg(long, env = "CREW_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_PLACEMENT_ATTEMPTS)]
    pub max_attempts: u32,

    /// Entry in the people directory that belongs to the automation itself.
    #[arg(long, env = "CREW_BOT_NAME", default_value = DEFAULT_BOT_NAME)]
    pub bot_name: String,

    /// File that receives step outputs (set by GitHub Actions).
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,
}

impl ReconcileSettings {
    /// Validate into a reconciliation config.
    pub fn reconcile_config(&self) -> Result<ReconcileConfig, CliError> {
        Ok(ReconcileConfig::new(self.team_size, self.total_people)?
            .with_max_attempts(self.max_attempts)?)
    }
}
