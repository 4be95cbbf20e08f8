//! Top-level error classification for the pipeline.

use thiserror::Error;

use runaudit_core::CollectionError;
use runaudit_git::GitError;
use runaudit_provenance::ProvenanceError;
use runaudit_sink::DeliveryError;

/// Any failure that aborts the run, classified by stage.
///
/// Assembly failures abort before any delivery attempt; delivery failures
/// arrive here only after the retry budget is exhausted.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Provenance(#[from] ProvenanceError),

    #[error("delivery failed after retries: {0}")]
    Delivery(#[from] DeliveryError),
}

impl PipelineError {
    /// Stage label for structured logging at the process boundary.
    ///
    /// An orphaned trigger gets its own label: it points at untracked
    /// workflow state, not at infrastructure.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Collection(_) => "collection",
            Self::Git(_) => "git",
            Self::Provenance(ProvenanceError::NoOwnerFound { .. }) => "provenance_no_owner",
            Self::Provenance(_) => "provenance",
            Self::Delivery(_) => "delivery",
        }
    }
}
