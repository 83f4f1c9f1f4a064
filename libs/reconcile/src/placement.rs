//! Randomized, capacity-bounded team placement.
//!
//! Each newcomer gets a bounded number of uniformly random picks among the
//! first `total_teams` teams. The first pick that lands on a team with room
//! wins. When every pick hits a full team the participant stays unplaced for
//! this run; a later run, after teams grow or members leave, picks them up.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::types::Team;

/// Default number of picks per participant before giving up.
pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Source of team indices for placement.
pub trait TeamPicker {
    /// Pick a team index in `0..team_count`. Never called with `team_count == 0`.
    ///
    /// Out-of-range indices are treated as a full team.
    fn pick(&mut self, team_count: usize) -> usize;
}

/// Uniform picker backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngPicker<R> {
    rng: R,
}

impl<R: Rng> RngPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngPicker<ThreadRng> {
    /// Entropy-seeded, thread-local generator.
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl RngPicker<StdRng> {
    /// Reproducible generator for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TeamPicker for RngPicker<R> {
    fn pick(&mut self, team_count: usize) -> usize {
        self.rng.random_range(0..team_count)
    }
}

/// Replays a fixed sequence of indices, cycling when exhausted.
///
/// An empty sequence always picks team 0.
#[derive(Debug, Clone, Default)]
pub struct SequencePicker {
    indices: Vec<usize>,
    cursor: usize,
    calls: usize,
}

impl SequencePicker {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
            cursor: 0,
            calls: 0,
        }
    }

    /// How many picks have been requested so far.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl TeamPicker for SequencePicker {
    fn pick(&mut self, _team_count: usize) -> usize {
        self.calls += 1;
        let Some(&index) = self.indices.get(self.cursor) else {
            return 0;
        };
        self.cursor = (self.cursor + 1) % self.indices.len();
        index
    }
}

/// Result of trying to place one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A team with room was found.
    Placed { team_index: usize, attempts: u32 },

    /// Every attempt hit a full team (or there are no teams to pick from).
    Unplaced { attempts: u32 },
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }

    pub fn attempts(&self) -> u32 {
        match *self {
            Self::Placed { attempts, .. } | Self::Unplaced { attempts } => attempts,
        }
    }
}

/// Choose a team for one participant.
///
/// Only teams `0..total_teams` are candidates, even when `teams` is longer.
pub fn choose_team<P>(
    teams: &[Team],
    team_size: usize,
    total_teams: usize,
    max_attempts: u32,
    picker: &mut P,
) -> Placement
where
    P: TeamPicker + ?Sized,
{
    if total_teams == 0 {
        return Placement::Unplaced { attempts: 0 };
    }

    for attempt in 1..=max_attempts {
        let team_index = picker.pick(total_teams);
        let has_room = team_index < total_teams
            && teams
                .get(team_index)
                .is_some_and(|team| team.len() < team_size);

        if has_room {
            return Placement::Placed {
                team_index,
                attempts: attempt,
            };
        }
    }

    Placement::Unplaced {
        attempts: max_attempts,
    }
}
