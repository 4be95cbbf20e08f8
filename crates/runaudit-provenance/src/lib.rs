//! # runaudit-provenance
//!
//! Resolves who or what triggered a workflow run.
//!
//! Scheduled runs are recognized by their run-id prefix and resolved to the
//! fixed scheduler actor without touching any external system — the common
//! case pays no database round-trip. Only human- or API-triggered runs fall
//! through to the workflow metadata store, where the most recent
//! trigger-class event for the workflow names the responsible owner.

pub mod error;
pub mod store;

pub use error::ProvenanceError;
pub use store::{OwnerStore, PgOwnerStore};

/// Run-id prefix marking runs started by time-based automation.
pub const SCHEDULED_PREFIX: &str = "scheduled";

/// Actor reported for scheduled runs.
pub const SCHEDULER_ACTOR: &str = "scheduler";

/// Resolves the triggering actor for a run.
#[derive(Debug)]
pub struct ProvenanceResolver<S> {
    store: S,
}

impl<S: OwnerStore> ProvenanceResolver<S> {
    /// Wrap an owner store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolve the actor that triggered the given run.
    ///
    /// Returns [`ProvenanceError::NoOwnerFound`] when a non-scheduled run
    /// has no trigger-class event on record — an orphaned trigger, reported
    /// distinctly from connectivity failures.
    pub async fn resolve(&self, dag_id: &str, run_id: &str) -> Result<String, ProvenanceError> {
        if run_id.starts_with(SCHEDULED_PREFIX) {
            return Ok(SCHEDULER_ACTOR.to_string());
        }

        match self.store.last_trigger_owner(dag_id).await? {
            Some(owner) => Ok(owner),
            None => Err(ProvenanceError::NoOwnerFound {
                dag_id: dag_id.to_string(),
            }),
        }
    }
}
