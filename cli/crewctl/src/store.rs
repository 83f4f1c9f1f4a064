//! Roster store: the JSON document on disk.
//!
//! Read once at the start of a run and written once at the end. Writes go to
//! a sibling temp file that is renamed over the roster, so a failed write never
//! leaves a truncated document behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crew_reconcile::{Roster, RosterLoad};
use tracing::{debug, warn};

use crate::error::CliError;

/// File-backed roster.
#[derive(Debug, Clone)]
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the roster, recovering from unreadable contents.
    ///
    /// Only I/O failures are errors; a document that is not valid UTF-8 or not
    /// a roster yields [`Roster::recovered`].
    pub fn load(&self) -> Result<RosterLoad> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CliError::RosterNotFound(self.path.clone()).into());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read roster from {:?}", self.path));
            }
        };
        debug!(path = %self.path.display(), bytes = bytes.len(), "Read roster");

        match String::from_utf8(bytes) {
            Ok(text) => Ok(Roster::parse_or_recover(&text)),
            Err(e) => {
                warn!(error = %e, "Roster is not valid UTF-8, starting from a single empty team");
                Ok(RosterLoad {
                    roster: Roster::recovered(),
                    recovered: true,
                })
            }
        }
    }

    /// Replace the roster on disk.
    pub fn save(&self, roster: &Roster) -> Result<()> {
        let contents = roster.to_pretty_json()?;
        let tmp = self.temp_path();

        fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write roster to {:?}", tmp))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace roster at {:?}", self.path))?;

        debug!(path = %self.path.display(), teams = roster.team_count(), "Saved roster");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}
