//! Team roster reconciliation.
//!
//! Keeps a persisted roster of fixed-capacity teams in step with the set of
//! currently eligible participants. Key concepts:
//!
//! - **Roster**: ordered teams of participant IDs, persisted as JSON.
//! - **Eligible participants**: who should be placed somewhere right now.
//! - **Orphan**: a placed participant that is no longer eligible.
//!
//! # Invariants
//!
//! - A participant appears in at most one team
//! - A placed participant never changes team; it can only be removed
//! - No team exceeds the configured team size after a run
//! - Teams are only ever appended, never reordered or merged
//!
//! The only non-determinism is team selection for newcomers, which goes
//! through a [`TeamPicker`] so callers can seed or script it.

mod document;
mod error;
mod message;
mod placement;
mod reconciler;
mod types;

pub use document::RosterLoad;
pub use error::ReconcileError;
pub use message::{commit_message, join_names, DEFAULT_ROSTER_FILE_NAME, REMOVE_ORPHANS_MESSAGE};
pub use placement::{
    choose_team, Placement, RngPicker, SequencePicker, TeamPicker, DEFAULT_MAX_PLACEMENT_ATTEMPTS,
};
pub use reconciler::{reconcile, ReconcileConfig, ReconcileOutcome};
pub use types::{Participant, Removal, Roster, Team};
