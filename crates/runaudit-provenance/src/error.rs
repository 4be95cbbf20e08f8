//! Error types for provenance resolution.

use thiserror::Error;

/// Errors that can occur while resolving the triggering actor.
#[derive(Debug, Error)]
pub enum ProvenanceError {
    /// A non-scheduled run has no trigger-class event on record.
    ///
    /// Kept distinct from [`ProvenanceError::Lookup`]: an orphaned trigger
    /// is operationally actionable, a connectivity failure is not.
    #[error("no owner found for dag '{dag_id}'")]
    NoOwnerFound { dag_id: String },

    /// The metadata store could not be reached or the query failed.
    #[error("provenance lookup failed: {0}")]
    Lookup(#[from] sqlx::Error),
}
