//! The audit record emitted once per workflow run.

use serde::{Deserialize, Serialize};

use crate::error::CollectionError;

/// One audit record describing a single workflow task execution.
///
/// Built exactly once per process invocation, then treated as immutable:
/// sinks serialize it but never change it, so retried deliveries carry
/// byte-identical payloads. Every field is required to be non-empty before
/// delivery is attempted ([`AuditRecord::validate`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Pod or host name the task ran on.
    pub hostname: String,

    /// Non-loopback IPv4 address of the host.
    pub ip: String,

    /// Deployment namespace.
    pub namespace: String,

    /// Workflow (DAG) identifier.
    pub dag_id: String,

    /// Workflow run identifier.
    pub run_id: String,

    /// Task identifier within the run.
    pub task_id: String,

    /// Actor or subsystem that started the run.
    pub triggered_by: String,

    /// Commit checked out when the task ran.
    pub commit_sha1: String,

    /// Branch checked out when the task ran.
    pub git_branch: String,

    /// Canonical repository string, e.g. `github.com/navikt/pipeline`.
    pub git_repo: String,

    /// Event time, ISO-8601.
    pub timestamp: String,
}

impl AuditRecord {
    /// All fields by name, in serialization order.
    pub fn fields(&self) -> [(&'static str, &str); 11] {
        [
            ("hostname", &self.hostname),
            ("ip", &self.ip),
            ("namespace", &self.namespace),
            ("dag_id", &self.dag_id),
            ("run_id", &self.run_id),
            ("task_id", &self.task_id),
            ("triggered_by", &self.triggered_by),
            ("commit_sha1", &self.commit_sha1),
            ("git_branch", &self.git_branch),
            ("git_repo", &self.git_repo),
            ("timestamp", &self.timestamp),
        ]
    }

    /// Check that every field is non-empty.
    ///
    /// A record missing any field must never reach a sink; the run aborts
    /// instead of delivering a partial record.
    pub fn validate(&self) -> Result<(), CollectionError> {
        for (field, value) in self.fields() {
            if value.is_empty() {
                return Err(CollectionError::EmptyField { field });
            }
        }
        Ok(())
    }
}
