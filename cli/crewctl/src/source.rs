//! Participant source: one entry per contributor in the people directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use crew_reconcile::Participant;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::CliError;

/// Lists eligible participants from a directory.
#[derive(Debug, Clone)]
pub struct ParticipantSource {
    dir: PathBuf,
    reserved: String,
}

impl ParticipantSource {
    /// `reserved` is the automation's own entry, which is never a participant.
    pub fn new(dir: impl Into<PathBuf>, reserved: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            reserved: reserved.into(),
        }
    }

    /// Current eligible participants, sorted by name.
    ///
    /// Hidden entries (leading `.`) and names that are not valid UTF-8 are
    /// skipped.
    pub fn list(&self) -> Result<Vec<Participant>> {
        if !self.dir.is_dir() {
            return Err(CliError::PeopleDirNotFound(self.dir.clone()).into());
        }

        let mut participants = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry =
                entry.with_context(|| format!("Failed to list people in {:?}", self.dir))?;

            let Some(name) = entry.file_name().to_str() else {
                warn!(entry = ?entry.file_name(), "Skipping entry with a non UTF-8 name");
                continue;
            };

            if name.starts_with('.') || name == self.reserved {
                continue;
            }

            participants.push(Participant::from(name));
        }

        debug!(dir = %self.dir.display(), count = participants.len(), "Listed participants");
        Ok(participants)
    }
}
