//! Owner lookup against the workflow metadata store.

use async_trait::async_trait;
use sqlx::{Connection, PgConnection};

use crate::error::ProvenanceError;

/// Event types that record who triggered a run.
const TRIGGER_EVENTS: [&str; 2] = ["trigger", "cli_task_run"];

/// Seam for the owner lookup, so resolution logic can be exercised without
/// a live database.
#[async_trait]
pub trait OwnerStore: Send + Sync {
    /// The owner of the most recent trigger-class event for a workflow,
    /// or `None` when no such event exists.
    async fn last_trigger_owner(&self, dag_id: &str) -> Result<Option<String>, ProvenanceError>;
}

/// Postgres-backed owner store, querying the workflow engine's event log.
#[derive(Debug, Clone)]
pub struct PgOwnerStore {
    database_url: String,
}

impl PgOwnerStore {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

#[async_trait]
impl OwnerStore for PgOwnerStore {
    async fn last_trigger_owner(&self, dag_id: &str) -> Result<Option<String>, ProvenanceError> {
        // One connection per lookup: opened here, closed before returning.
        let mut conn = PgConnection::connect(&self.database_url).await?;

        let row: Result<Option<(String,)>, sqlx::Error> = sqlx::query_as(
            "SELECT owner FROM public.log \
             WHERE dag_id = $1 AND event IN ($2, $3) \
             ORDER BY dttm DESC LIMIT 1",
        )
        .bind(dag_id)
        .bind(TRIGGER_EVENTS[0])
        .bind(TRIGGER_EVENTS[1])
        .fetch_optional(&mut conn)
        .await;

        // Close cleanly on both paths; a failed close is not worth failing
        // the lookup over.
        if let Err(close_err) = conn.close().await {
            tracing::warn!(error = %close_err, "closing metadata db connection failed");
        }

        Ok(row?.map(|(owner,)| owner))
    }
}
