//! Roster reconciliation.
//!
//! Converges a persisted roster toward the current set of eligible
//! participants:
//!
//! 1. Placements of participants no longer eligible are removed.
//! 2. Every surviving placement keeps its team index.
//! 3. The team list grows (never shrinks) to the configured team count.
//! 4. Newly eligible participants are placed at random under the capacity bound.

use std::collections::HashSet;
use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::ReconcileError;
use crate::message::commit_message;
use crate::placement::{choose_team, Placement, TeamPicker, DEFAULT_MAX_PLACEMENT_ATTEMPTS};
use crate::types::{Participant, Removal, Roster, Team};

/// Validated inputs for a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileConfig {
    team_size: NonZeroUsize,
    total_people: usize,
    max_attempts: u32,
}

impl ReconcileConfig {
    /// Create a config for the given capacity and expected head count.
    ///
    /// `total_people` is the configured expectation, independent of how many
    /// participants are actually eligible.
    pub fn new(team_size: usize, total_people: usize) -> Result<Self, ReconcileError> {
        let team_size =
            NonZeroUsize::new(team_size).ok_or(ReconcileError::InvalidTeamSize(team_size))?;

        Ok(Self {
            team_size,
            total_people,
            max_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
        })
    }

    /// Override the per-participant placement attempt cap.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Result<Self, ReconcileError> {
        if max_attempts == 0 {
            return Err(ReconcileError::InvalidMaxAttempts(max_attempts));
        }
        self.max_attempts = max_attempts;
        Ok(self)
    }

    pub fn team_size(&self) -> usize {
        self.team_size.get()
    }

    pub fn total_people(&self) -> usize {
        self.total_people
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// `floor(total_people / team_size)`.
    pub fn total_teams(&self) -> usize {
        self.total_people / self.team_size.get()
    }
}

/// Everything a reconciliation run changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    /// The reconciled roster.
    pub roster: Roster,

    /// Team count derived from configuration for this run.
    pub total_teams: usize,

    /// Newcomers placed this run, in discovery order.
    pub added: Vec<Participant>,

    /// Newcomers that exhausted their placement attempts.
    pub unplaced: Vec<Participant>,

    /// Placements of participants no longer eligible, in roster order.
    pub removed: Vec<Removal>,

    /// Repeat placements of an already placed participant, dropped.
    pub duplicates: Vec<Removal>,
}

impl ReconcileOutcome {
    /// True if the roster membership did not change.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.duplicates.is_empty()
    }

    /// Commit message for this run.
    pub fn commit_message(&self, roster_file_name: &str) -> String {
        commit_message(&self.added, roster_file_name)
    }
}

/// Reconcile `roster` against the eligible participants.
///
/// `eligible` is treated as a set; repeated identifiers are ignored after
/// their first occurrence, which also fixes discovery order for newcomers.
#[instrument(
    skip_all,
    fields(
        team_size = config.team_size(),
        total_people = config.total_people(),
        total_teams = config.total_teams(),
        eligible = eligible.len(),
    )
)]
pub fn reconcile<P>(
    roster: Roster,
    eligible: &[Participant],
    config: &ReconcileConfig,
    picker: &mut P,
) -> ReconcileOutcome
where
    P: TeamPicker + ?Sized,
{
    let eligible_set: HashSet<&Participant> = eligible.iter().collect();
    let mut teams = roster.into_teams();

    let pruned = prune(&mut teams, &eligible_set);
    for removal in &pruned.removed {
        info!(
            team_index = removal.team_index,
            participant = %removal.participant,
            "Removing orphaned participant"
        );
    }
    for duplicate in &pruned.duplicates {
        warn!(
            team_index = duplicate.team_index,
            participant = %duplicate.participant,
            "Dropping duplicate placement"
        );
    }

    let mut queued = HashSet::new();
    let newcomers: Vec<&Participant> = eligible
        .iter()
        .filter(|p| !pruned.placed.contains(*p) && queued.insert(*p))
        .collect();
    debug!(newcomers = newcomers.len(), "Computed new participants");

    let total_teams = config.total_teams();
    if teams.len() < total_teams {
        debug!(from = teams.len(), to = total_teams, "Growing team list");
        teams.resize_with(total_teams, Team::new);
    }
    // Overfull teams keep their members and receive no newcomers.
    for (team_index, team) in teams.iter().enumerate() {
        if team.len() > config.team_size() {
            warn!(team_index, members = team.len(), "Team is over capacity");
        }
    }

    let mut added = Vec::new();
    let mut unplaced = Vec::new();
    for participant in newcomers {
        let placement = choose_team(
            &teams,
            config.team_size(),
            total_teams,
            config.max_attempts(),
            &mut *picker,
        );

        let attempts = placement.attempts();
        match placement {
            Placement::Placed { team_index, .. } => {
                debug!(team_index, attempts, participant = %participant, "Placed participant");
                if let Some(team) = teams.get_mut(team_index) {
                    team.push(participant.clone());
                }
                added.push(participant.clone());
            }
            Placement::Unplaced { .. } => {
                warn!(
                    attempts,
                    participant = %participant,
                    "No team with room found, leaving participant for a later run"
                );
                unplaced.push(participant.clone());
            }
        }
    }

    info!(
        added = added.len(),
        unplaced = unplaced.len(),
        removed = pruned.removed.len(),
        duplicates = pruned.duplicates.len(),
        "Reconciliation complete"
    );

    ReconcileOutcome {
        roster: Roster::new(teams),
        total_teams,
        added,
        unplaced,
        removed: pruned.removed,
        duplicates: pruned.duplicates,
    }
}

struct Pruned<'a> {
    removed: Vec<Removal>,
    duplicates: Vec<Removal>,
    placed: HashSet<&'a Participant>,
}

/// Drop ineligible and repeated placements in place.
///
/// Positions are collected first and removed highest-index-first so that
/// earlier removals never shift later ones.
fn prune<'a>(teams: &mut [Team], eligible: &HashSet<&'a Participant>) -> Pruned<'a> {
    let mut removed = Vec::new();
    let mut duplicates = Vec::new();
    let mut placed: HashSet<&'a Participant> = HashSet::new();
    let mut positions: Vec<(usize, usize)> = Vec::new();

    for (team_index, team) in teams.iter().enumerate() {
        for (member_index, member) in team.iter().enumerate() {
            match eligible.get(member) {
                None => {
                    removed.push(Removal::new(team_index, member.clone()));
                    positions.push((team_index, member_index));
                }
                Some(&id) => {
                    if !placed.insert(id) {
                        duplicates.push(Removal::new(team_index, member.clone()));
                        positions.push((team_index, member_index));
                    }
                }
            }
        }
    }

    for &(team_index, member_index) in positions.iter().rev() {
        if let Some(team) = teams.get_mut(team_index) {
            team.remove(member_index);
        }
    }

    Pruned {
        removed,
        duplicates,
        placed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::RosterLoad;
    use crate::message::DEFAULT_ROSTER_FILE_NAME;
    use crate::placement::{RngPicker, SequencePicker};

    fn people(ids: &[&str]) -> Vec<Participant> {
        ids.iter().map(|&id| Participant::from(id)).collect()
    }

    fn roster(teams: &[&[&str]]) -> Roster {
        Roster::new(teams.iter().map(|team| people(team)).collect())
    }

    #[test]
    fn test_config_rejects_zero_team_size() {
        let err = ReconcileConfig::new(0, 10).unwrap_err();
        assert!(matches!(err, ReconcileError::InvalidTeamSize(0)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_config_rejects_zero_attempts() {
        let err = ReconcileConfig::new(4, 10)
            .unwrap()
            .with_max_attempts(0)
            .unwrap_err();
        assert!(matches!(err, ReconcileError::InvalidMaxAttempts(0)));
    }

    #[test]
    fn test_total_teams_is_floored() {
        assert_eq!(ReconcileConfig::new(4, 10).unwrap().total_teams(), 2);
        assert_eq!(ReconcileConfig::new(4, 3).unwrap().total_teams(), 0);
        assert_eq!(ReconcileConfig::new(1, 0).unwrap().total_teams(), 0);
    }

    #[test]
    fn test_noop_preserves_roster_exactly() {
        let input = roster(&[&["alice", "bob"], &["carol"]]);
        let config = ReconcileConfig::new(2, 4).unwrap();
        let mut picker = SequencePicker::new([0]);

        let outcome = reconcile(
            input.clone(),
            &people(&["carol", "alice", "bob"]),
            &config,
            &mut picker,
        );

        assert_eq!(outcome.roster, input);
        assert!(outcome.added.is_empty());
        assert!(outcome.removed.is_empty());
        assert!(outcome.is_noop());
        assert_eq!(picker.calls(), 0);
        assert_eq!(
            outcome.commit_message(DEFAULT_ROSTER_FILE_NAME),
            "feat: remove orphans"
        );
    }

    #[test]
    fn test_multiple_orphans_in_one_team() {
        let input = roster(&[&["a", "x", "b", "y", "z"], &["w", "c"]]);
        let config = ReconcileConfig::new(5, 10).unwrap();
        let mut picker = SequencePicker::new([0]);

        let outcome = reconcile(input, &people(&["a", "b", "c"]), &config, &mut picker);

        assert_eq!(outcome.roster, roster(&[&["a", "b"], &["c"]]));
        assert_eq!(
            outcome.removed,
            vec![
                Removal::new(0, "x".into()),
                Removal::new(0, "y".into()),
                Removal::new(0, "z".into()),
                Removal::new(1, "w".into()),
            ]
        );
    }

    #[test]
    fn test_placement_follows_picker() {
        let input = roster(&[&["alice"], &[]]);
        let config = ReconcileConfig::new(2, 4).unwrap();
        // bob -> 1, carol -> 0, dave -> 0 (full) then 1
        let mut picker = SequencePicker::new([1, 0, 0, 1]);

        let outcome = reconcile(
            input,
            &people(&["alice", "bob", "carol", "dave"]),
            &config,
            &mut picker,
        );

        assert_eq!(
            outcome.roster,
            roster(&[&["alice", "carol"], &["bob", "dave"]])
        );
        assert_eq!(outcome.added, people(&["bob", "carol", "dave"]));
        assert_eq!(
            outcome.commit_message(DEFAULT_ROSTER_FILE_NAME),
            "feat: add bob, carol and dave to teams.json"
        );
    }

    #[test]
    fn test_grows_team_list() {
        let config = ReconcileConfig::new(2, 6).unwrap();
        let mut picker = SequencePicker::new([2]);

        let outcome = reconcile(
            Roster::empty(),
            &people(&["alice"]),
            &config,
            &mut picker,
        );

        assert_eq!(outcome.roster, roster(&[&[], &[], &["alice"]]));
        assert_eq!(outcome.total_teams, 3);
    }

    #[test]
    fn test_never_shrinks_team_list() {
        let input = roster(&[&["a"], &["b"], &["c"]]);
        let config = ReconcileConfig::new(2, 2).unwrap();
        let mut picker = SequencePicker::new([0]);

        let outcome = reconcile(input, &people(&["c"]), &config, &mut picker);

        assert_eq!(outcome.roster, roster(&[&[], &[], &["c"]]));
    }

    #[test]
    fn test_recovered_roster_is_filled() {
        let RosterLoad { roster, recovered } = Roster::parse_or_recover("{ not json");
        assert!(recovered);

        let config = ReconcileConfig::new(4, 4).unwrap();
        let outcome = reconcile(
            roster,
            &people(&["alice"]),
            &config,
            &mut RngPicker::seeded(1),
        );

        assert_eq!(outcome.roster, Roster::new(vec![people(&["alice"])]));
        assert_eq!(outcome.added, people(&["alice"]));
    }

    #[test]
    fn test_starvation_leaves_participant_unplaced() {
        let input = roster(&[&["alice"]]);
        let config = ReconcileConfig::new(1, 1).unwrap();
        let mut picker = SequencePicker::new([0]);

        let outcome = reconcile(input, &people(&["alice", "bob"]), &config, &mut picker);

        assert_eq!(outcome.roster, roster(&[&["alice"]]));
        assert!(outcome.added.is_empty());
        assert_eq!(outcome.unplaced, people(&["bob"]));
        assert_eq!(picker.calls(), 100);
        assert!(!outcome.roster.contains(&"bob".into()));
    }

    #[test]
    fn test_overfull_team_is_kept_and_gets_no_newcomers() {
        // team size lowered after the roster was written
        let input = roster(&[&["a", "b", "c"], &[]]);
        let config = ReconcileConfig::new(2, 4).unwrap();
        let mut picker = SequencePicker::new([0, 0, 1]);

        let outcome = reconcile(input, &people(&["a", "b", "c", "d"]), &config, &mut picker);

        assert_eq!(outcome.roster, roster(&[&["a", "b", "c"], &["d"]]));
        assert!(outcome.removed.is_empty());
        assert_eq!(outcome.added, people(&["d"]));
        assert_eq!(picker.calls(), 3);
    }

    #[test]
    fn test_zero_total_teams_places_no_one() {
        let config = ReconcileConfig::new(4, 3).unwrap();
        let mut picker = SequencePicker::new([0]);

        let outcome = reconcile(
            Roster::recovered(),
            &people(&["alice", "bob"]),
            &config,
            &mut picker,
        );

        assert_eq!(outcome.roster, Roster::recovered());
        assert_eq!(outcome.unplaced, people(&["alice", "bob"]));
        assert_eq!(picker.calls(), 0);
    }

    #[test]
    fn test_duplicate_placements_keep_first() {
        let input = roster(&[&["alice", "bob"], &["alice", "carol"]]);
        let config = ReconcileConfig::new(4, 8).unwrap();
        let mut picker = SequencePicker::new([0]);

        let outcome = reconcile(
            input,
            &people(&["alice", "bob", "carol"]),
            &config,
            &mut picker,
        );

        assert_eq!(outcome.roster, roster(&[&["alice", "bob"], &["carol"]]));
        assert_eq!(outcome.duplicates, vec![Removal::new(1, "alice".into())]);
        assert!(outcome.removed.is_empty());
        assert!(!outcome.is_noop());
    }

    #[test]
    fn test_repeated_eligible_ids_are_placed_once() {
        let config = ReconcileConfig::new(4, 4).unwrap();
        let mut picker = SequencePicker::new([0]);

        let outcome = reconcile(
            Roster::empty(),
            &people(&["alice", "alice", "bob"]),
            &config,
            &mut picker,
        );

        assert_eq!(outcome.roster, roster(&[&["alice", "bob"]]));
        assert_eq!(outcome.added, people(&["alice", "bob"]));
    }

    #[test]
    fn test_removed_participant_frees_room_for_newcomer() {
        let input = roster(&[&["alice", "bob"]]);
        let config = ReconcileConfig::new(2, 2).unwrap();
        let mut picker = SequencePicker::new([0]);

        let outcome = reconcile(input, &people(&["alice", "carol"]), &config, &mut picker);

        assert_eq!(outcome.roster, roster(&[&["alice", "carol"]]));
        assert_eq!(outcome.removed, vec![Removal::new(0, "bob".into())]);
        assert_eq!(outcome.added, people(&["carol"]));
    }
}
