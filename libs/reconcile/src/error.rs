//! Error types for roster reconciliation.

use thiserror::Error;

/// Errors that can occur when configuring or persisting a reconciliation run.
///
/// Placement starvation and corrupt roster documents are not errors: both are
/// recovered locally and reported through the outcome.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Team size must be a positive integer.
    #[error("invalid team size: {0} (must be at least 1)")]
    InvalidTeamSize(usize),

    /// The placement retry cap must allow at least one attempt.
    #[error("invalid placement attempt limit: {0} (must be at least 1)")]
    InvalidMaxAttempts(u32),

    /// The roster document does not have the expected `{ "teams": [[..]] }` shape.
    #[error("malformed roster: {0}")]
    MalformedRoster(#[source] serde_json::Error),

    /// The roster could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl ReconcileError {
    /// Returns true if this error was caused by invalid configuration values.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ReconcileError::InvalidTeamSize(_) | ReconcileError::InvalidMaxAttempts(_)
        )
    }
}
