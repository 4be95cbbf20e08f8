//! End-to-end pipeline tests with stubbed collaborators.
//!
//! The git checkout is a real temp directory; the owner store and the sink
//! are in-process stubs. Only host address discovery touches the machine.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use runaudit_cli::{assemble, PipelineError};
use runaudit_core::{AuditRecord, Config, RetryPolicy, SinkConfig};
use runaudit_provenance::{OwnerStore, ProvenanceError};
use runaudit_sink::{with_retry, DeliveryError, DeliverySink};

const COMMIT: &str = "27f960c46e7b1a02f0a0d0b0c9d8e7f6a5b4c3d2";

fn checkout() -> TempDir {
    let dir = TempDir::new().unwrap();
    let heads = dir.path().join(".git/refs/heads");
    fs::create_dir_all(&heads).unwrap();
    fs::write(heads.join("main"), format!("{COMMIT}\n")).unwrap();
    fs::write(
        dir.path().join(".git/config"),
        "[remote \"origin\"]\n\turl = https://github.com/navikt/nightly-load.git\n",
    )
    .unwrap();
    dir
}

fn config(repo_root: &Path, run_id: &str) -> Config {
    Config {
        pod_name: "airflow-worker-0".to_string(),
        namespace: "team-pipelines".to_string(),
        dag_id: "nightly-load".to_string(),
        run_id: run_id.to_string(),
        task_id: "extract".to_string(),
        git_repo_path: repo_root.to_path_buf(),
        airflow_db_url: "postgres://airflow@db:5432/airflow".to_string(),
        sink: SinkConfig::Proxy {
            base_url: "http://audit-proxy".to_string(),
        },
    }
}

/// Owner store that must not be consulted.
struct UnreachableStore;

#[async_trait]
impl OwnerStore for UnreachableStore {
    async fn last_trigger_owner(&self, _dag_id: &str) -> Result<Option<String>, ProvenanceError> {
        panic!("owner store consulted for a scheduled run");
    }
}

/// Owner store with a fixed answer.
struct FixedStore(Option<String>);

#[async_trait]
impl OwnerStore for FixedStore {
    async fn last_trigger_owner(&self, _dag_id: &str) -> Result<Option<String>, ProvenanceError> {
        Ok(self.0.clone())
    }
}

/// Sink that counts attempts and fails the first `failures` of them.
struct CountingSink {
    attempts: AtomicU32,
    failures: u32,
}

impl CountingSink {
    fn new(failures: u32) -> Self {
        Self {
            attempts: AtomicU32::new(0),
            failures,
        }
    }
}

#[async_trait]
impl DeliverySink for CountingSink {
    async fn deliver(&self, record: &AuditRecord) -> Result<(), DeliveryError> {
        record.validate().expect("sink received an incomplete record");
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.failures {
            Err(DeliveryError::UnexpectedStatus {
                status: 503,
                body: "unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[tokio::test]
async fn scheduled_run_assembles_and_delivers_on_the_first_attempt() {
    let dir = checkout();
    let config = config(dir.path(), "scheduled__2024-01-01T000000");

    let record = assemble(&config, UnreachableStore).await.unwrap();
    assert_eq!(record.triggered_by, "scheduler");
    assert_eq!(record.commit_sha1, COMMIT);
    assert_eq!(record.git_branch, "main");
    assert_eq!(record.git_repo, "github.com/navikt/nightly-load.git");
    assert_eq!(record.timestamp, "2024-01-01T00:00:00Z");

    let sink = CountingSink::new(0);
    with_retry(&RetryPolicy::default(), || sink.deliver(&record))
        .await
        .unwrap();
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn manual_run_takes_its_timestamp_from_the_run_id() {
    let dir = checkout();
    let config = config(dir.path(), "manual__2023-02-13T131127.5671880000-27f960c46");

    let record = assemble(&config, FixedStore(Some("alice".to_string())))
        .await
        .unwrap();
    assert_eq!(record.triggered_by, "alice");
    assert_eq!(record.timestamp, "2023-02-13T13:11:27Z");
    record.validate().unwrap();
}

#[tokio::test]
async fn orphaned_manual_run_aborts_before_delivery() {
    let dir = checkout();
    let config = config(dir.path(), "manual__2023-02-13T131127");

    let err = assemble(&config, FixedStore(None)).await.unwrap_err();
    assert_eq!(err.stage(), "provenance_no_owner");
    assert!(err.to_string().contains("nightly-load"));
}

#[tokio::test]
async fn broken_checkout_aborts_before_delivery() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path(), "scheduled__2024-01-01T000000");

    let err = assemble(&config, UnreachableStore).await.unwrap_err();
    assert!(matches!(err, PipelineError::Git(_)));
    assert_eq!(err.stage(), "git");
}

#[tokio::test]
async fn exhausted_retries_surface_the_final_delivery_error() {
    let dir = checkout();
    let config = config(dir.path(), "scheduled__2024-01-01T000000");
    let record = assemble(&config, UnreachableStore).await.unwrap();

    // Sink that never succeeds; short schedule to keep the test fast.
    let sink = CountingSink::new(u32::MAX);
    let policy = RetryPolicy::new(vec![Duration::from_millis(10); 3]);

    let err = with_retry(&policy, || sink.deliver(&record))
        .await
        .unwrap_err();
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 4);
    assert!(matches!(
        err,
        DeliveryError::UnexpectedStatus { status: 503, .. }
    ));
}
