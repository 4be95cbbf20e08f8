//! Stored-procedure backend for the relational append-only log.

use async_trait::async_trait;
use runaudit_core::AuditRecord;
use sqlx::{Connection, PgConnection};

use crate::error::DeliveryError;
use crate::DeliverySink;

/// Invokes the audit-log stored procedure with the record JSON as its
/// single text parameter.
///
/// The procedure is expected to insert exactly one row; any other affected
/// count means it ran without recording the event, which is a failure —
/// never a silent success.
#[derive(Debug, Clone)]
pub struct ProcedureSink {
    database_url: String,
}

impl ProcedureSink {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

#[async_trait]
impl DeliverySink for ProcedureSink {
    async fn deliver(&self, record: &AuditRecord) -> Result<(), DeliveryError> {
        let payload = serde_json::to_string(record)?;

        // One connection per attempt, closed before returning.
        let mut conn = PgConnection::connect(&self.database_url).await?;

        let result = sqlx::query("CALL audit_log_insert($1)")
            .bind(&payload)
            .execute(&mut conn)
            .await;

        if let Err(close_err) = conn.close().await {
            tracing::warn!(error = %close_err, "closing audit log connection failed");
        }

        let affected = result?.rows_affected();
        if affected != 1 {
            return Err(DeliveryError::RowCount {
                expected: 1,
                actual: affected,
            });
        }

        Ok(())
    }
}
