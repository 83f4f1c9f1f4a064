//! Roster domain types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque participant identifier.
///
/// Nothing beyond equality is interpreted; in practice this is the name of a
/// file contributed to the people directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    /// Creates a participant from any string-like identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Participant {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Participant {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for Participant {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A team: participants in insertion order.
pub type Team = Vec<Participant>;

/// The full persisted collection of teams.
///
/// Team indices are stable across runs: teams are appended, never reordered,
/// merged, or dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    teams: Vec<Team>,
}

impl Roster {
    /// Creates a roster from existing teams.
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    /// A roster with no teams at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The roster substituted for an unreadable document: a single empty team.
    pub fn recovered() -> Self {
        Self {
            teams: vec![Team::new()],
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn into_teams(self) -> Vec<Team> {
        self.teams
    }

    /// Number of teams, including empty ones.
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Number of placements across all teams.
    pub fn member_count(&self) -> usize {
        self.teams.iter().map(Vec::len).sum()
    }

    /// Returns true if the participant is placed in any team.
    pub fn contains(&self, participant: &Participant) -> bool {
        self.team_of(participant).is_some()
    }

    /// Index of the first team holding the participant.
    pub fn team_of(&self, participant: &Participant) -> Option<usize> {
        self.teams
            .iter()
            .position(|team| team.contains(participant))
    }
}

/// A placement removed during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal {
    /// Team the participant was removed from.
    pub team_index: usize,

    /// The removed participant.
    pub participant: Participant,
}

impl Removal {
    pub fn new(team_index: usize, participant: Participant) -> Self {
        Self {
            team_index,
            participant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(teams: &[&[&str]]) -> Roster {
        Roster::new(
            teams
                .iter()
                .map(|team| team.iter().map(|&p| Participant::from(p)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_recovered_roster_has_one_empty_team() {
        let r = Roster::recovered();
        assert_eq!(r.team_count(), 1);
        assert_eq!(r.member_count(), 0);
    }

    #[test]
    fn test_team_of() {
        let r = roster(&[&["alice", "bob"], &[], &["carol"]]);

        assert_eq!(r.team_of(&"alice".into()), Some(0));
        assert_eq!(r.team_of(&"carol".into()), Some(2));
        assert_eq!(r.team_of(&"dave".into()), None);
        assert!(r.contains(&"bob".into()));
        assert_eq!(r.member_count(), 3);
    }

    #[test]
    fn test_participant_serializes_as_plain_string() {
        let json = serde_json::to_string(&Participant::from("alice")).unwrap();
        assert_eq!(json, "\"alice\"");
    }
}
