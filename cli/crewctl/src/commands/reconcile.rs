//! Reconcile command (sync the roster with the people directory).

use anyhow::Result;
use clap::Args;
use crew_reconcile::{reconcile, ReconcileOutcome, RngPicker, RosterLoad, TeamPicker};
use serde::Serialize;
use tracing::info;

use crate::config::ReconcileSettings;
use crate::github::write_step_output;
use crate::output::{print_single, print_status, OutputFormat, Status};
use crate::source::ParticipantSource;
use crate::store::RosterStore;

use super::CommandContext;

/// Step output carrying the commit message.
const COMMIT_MESSAGE_OUTPUT: &str = "commit_msg";

/// Reconcile command - remove orphans, place newcomers, persist the roster.
#[derive(Debug, Args)]
pub struct ReconcileCommand {
    #[command(flatten)]
    settings: ReconcileSettings,

    /// Compute and print changes without writing the roster.
    #[arg(long)]
    dry_run: bool,

    /// Seed for team selection, for reproducible runs.
    #[arg(long, env = "CREW_SEED")]
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct RunReport {
    #[serde(flatten)]
    outcome: ReconcileOutcome,
    commit_message: String,
    recovered: bool,
    persisted: bool,
}

impl ReconcileCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let report = self.execute(ctx)?;

        if let Some(path) = &self.settings.github_output {
            write_step_output(path, COMMIT_MESSAGE_OUTPUT, &report.commit_message)?;
        }

        print_report(&report, ctx.format);
        Ok(())
    }

    /// Run one reconciliation. The roster is written only after every input
    /// has been read and the reconciliation has completed.
    fn execute(&self, ctx: &CommandContext) -> Result<RunReport> {
        let config = self.settings.reconcile_config()?;
        info!(
            team_size = config.team_size(),
            total_people = config.total_people(),
            total_teams = config.total_teams(),
            "Configuration loaded"
        );

        let store = RosterStore::new(&ctx.paths.roster);
        let RosterLoad { roster, recovered } = store.load()?;

        let source = ParticipantSource::new(&ctx.paths.people_dir, &self.settings.bot_name);
        let eligible = source.list()?;

        let mut picker: Box<dyn TeamPicker> = match self.seed {
            Some(seed) => Box::new(RngPicker::seeded(seed)),
            None => Box::new(RngPicker::thread()),
        };
        let outcome = reconcile(roster, &eligible, &config, picker.as_mut());

        let persisted = if self.dry_run {
            info!(path = %store.path().display(), "Dry run, roster not written");
            false
        } else {
            store.save(&outcome.roster)?;
            true
        };

        let commit_message = outcome.commit_message(&ctx.paths.roster_file_name());

        Ok(RunReport {
            outcome,
            commit_message,
            recovered,
            persisted,
        })
    }
}

/// Status lines go to stderr and the commit message alone to stdout, so
/// `$(crew reconcile)` captures just the message.
fn print_report(report: &RunReport, format: OutputFormat) {
    if format == OutputFormat::Json {
        print_single(report);
        return;
    }

    for (status, line) in status_lines(report) {
        print_status(status, &line);
    }
    println!("{}", report.commit_message);
}

fn status_lines(report: &RunReport) -> Vec<(Status, String)> {
    let outcome = &report.outcome;
    let mut lines = Vec::new();

    if report.recovered {
        lines.push((
            Status::Warning,
            "Existing teams could not be restored; the roster was rebuilt".to_string(),
        ));
    }
    for removal in &outcome.removed {
        lines.push((
            Status::Removed,
            format!("{} (team {})", removal.participant, removal.team_index),
        ));
    }
    for duplicate in &outcome.duplicates {
        lines.push((
            Status::Warning,
            format!(
                "Dropped duplicate placement of {} in team {}",
                duplicate.participant, duplicate.team_index
            ),
        ));
    }
    for participant in &outcome.added {
        let line = match outcome.roster.team_of(participant) {
            Some(team_index) => format!("{} (team {})", participant, team_index),
            None => participant.to_string(),
        };
        lines.push((Status::Added, line));
    }
    for participant in &outcome.unplaced {
        lines.push((
            Status::Warning,
            format!(
                "No team with room for {}; they will be placed on a later run",
                participant
            ),
        ));
    }
    if !report.persisted {
        lines.push((Status::Info, "Dry run: roster not written".to_string()));
    }

    lines
}
