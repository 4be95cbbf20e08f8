//! Audit record assembly.
//!
//! Collection runs as one linear sequence: host identity, trigger
//! provenance, git context, timestamp. The record is built once, validated
//! complete, and never mutated afterwards. Any gap aborts the run before a
//! delivery attempt is made — a partial record is never emitted.

use chrono::{SecondsFormat, Utc};

use runaudit_core::{net, runid, AuditRecord, Config};
use runaudit_git::GitContext;
use runaudit_provenance::{OwnerStore, ProvenanceResolver};

use crate::error::PipelineError;

/// Collect all inputs and build the run's audit record.
pub async fn assemble<S: OwnerStore>(
    config: &Config,
    store: S,
) -> Result<AuditRecord, PipelineError> {
    let ip = net::host_ipv4()?;

    let triggered_by = ProvenanceResolver::new(store)
        .resolve(&config.dag_id, &config.run_id)
        .await?;

    let git = GitContext::read(&config.git_repo_path)?;

    // The run id's embedded date is the run's logical event time; the wall
    // clock is only a fallback for ids outside the naming convention.
    let timestamp = runid::run_timestamp(&config.run_id)
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));

    let record = AuditRecord {
        hostname: config.pod_name.clone(),
        ip,
        namespace: config.namespace.clone(),
        dag_id: config.dag_id.clone(),
        run_id: config.run_id.clone(),
        task_id: config.task_id.clone(),
        triggered_by,
        commit_sha1: git.commit_sha1,
        git_branch: git.branch,
        git_repo: git.repo,
        timestamp,
    };
    record.validate()?;

    tracing::debug!(
        dag_id = %record.dag_id,
        run_id = %record.run_id,
        triggered_by = %record.triggered_by,
        "audit record assembled"
    );

    Ok(record)
}
