//! Commit message formatting for a reconciliation run.

use crate::types::Participant;

/// Roster file name used in commit messages when the caller has no other.
pub const DEFAULT_ROSTER_FILE_NAME: &str = "teams.json";

/// Message used when no one was added.
pub const REMOVE_ORPHANS_MESSAGE: &str = "feat: remove orphans";

/// Join names for humans: `a`, `a and b`, `a, b and c`.
pub fn join_names(names: &[Participant]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [rest @ .., last] => {
            let head: Vec<&str> = rest.iter().map(Participant::as_str).collect();
            format!("{} and {}", head.join(", "), last)
        }
    }
}

/// Build the commit message announcing newly placed participants.
pub fn commit_message(added: &[Participant], roster_file_name: &str) -> String {
    if added.is_empty() {
        return REMOVE_ORPHANS_MESSAGE.to_string();
    }

    format!("feat: add {} to {}", join_names(added), roster_file_name)
}
