//! Roster document codec.
//!
//! The persisted form is `{ "teams": [["id", ...], ...] }`, pretty-printed
//! with four-space indentation so version-control diffs stay readable.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::warn;

use crate::error::ReconcileError;
use crate::types::Roster;

const INDENT: &[u8] = b"    ";

/// A roster read from a document, noting whether recovery kicked in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLoad {
    pub roster: Roster,

    /// True when the document was unreadable and [`Roster::recovered`] was used.
    pub recovered: bool,
}

impl Roster {
    /// Strictly parse a roster document.
    pub fn from_json(text: &str) -> Result<Self, ReconcileError> {
        serde_json::from_str(text).map_err(ReconcileError::MalformedRoster)
    }

    /// Parse a roster document, substituting a single empty team if it is
    /// malformed. Never fails.
    pub fn parse_or_recover(text: &str) -> RosterLoad {
        match Self::from_json(text) {
            Ok(roster) => RosterLoad {
                roster,
                recovered: false,
            },
            Err(e) => {
                warn!(error = %e, "Could not restore existing teams, starting from a single empty team");
                RosterLoad {
                    roster: Self::recovered(),
                    recovered: true,
                }
            }
        }
    }

    /// Render the roster document. Output carries no trailing newline.
    pub fn to_pretty_json(&self) -> Result<String, ReconcileError> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut ser)
            .map_err(ReconcileError::Serialization)?;

        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
