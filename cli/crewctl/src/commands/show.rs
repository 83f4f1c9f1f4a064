//! Show command (print the persisted roster).

use anyhow::Result;
use clap::Args;
use crew_reconcile::{join_names, Roster};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_output, print_single, print_status, OutputFormat, Status};
use crate::store::RosterStore;

use super::CommandContext;

/// Show command - read-only view of the roster.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Team capacity, to display fill level.
    #[arg(long, env = "CREW_TEAM_SIZE")]
    team_size: Option<usize>,
}

#[derive(Debug, Serialize, Tabled)]
struct TeamRow {
    #[tabled(rename = "Team")]
    team: usize,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Members")]
    members: String,
}

impl ShowCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let load = RosterStore::new(&ctx.paths.roster).load()?;

        match ctx.format {
            OutputFormat::Json => print_single(&load.roster),
            OutputFormat::Table => {
                if load.recovered {
                    print_status(
                        Status::Warning,
                        "Roster could not be parsed; showing an empty roster",
                    );
                }
                print_output(&self.rows(&load.roster), ctx.format);
            }
        }

        Ok(())
    }

    fn rows(&self, roster: &Roster) -> Vec<TeamRow> {
        roster
            .teams()
            .iter()
            .enumerate()
            .map(|(team, members)| TeamRow {
                team,
                size: match self.team_size {
                    Some(capacity) => format!("{}/{}", members.len(), capacity),
                    None => members.len().to_string(),
                },
                members: join_names(members),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_show_fill_level() {
        let roster = Roster::new(vec![
            vec!["alice".into(), "bob".into(), "carol".into()],
            vec![],
        ]);
        let cmd = ShowCommand { team_size: Some(4) };

        let rows = cmd.rows(&roster);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].size, "3/4");
        assert_eq!(rows[0].members, "alice, bob and carol");
        assert_eq!(rows[1].size, "0/4");
        assert_eq!(rows[1].members, "");
    }

    #[test]
    fn test_rows_without_capacity() {
        let roster = Roster::new(vec![vec!["alice".into()]]);
        let rows = ShowCommand { team_size: None }.rows(&roster);
        assert_eq!(rows[0].size, "1");
    }
}
