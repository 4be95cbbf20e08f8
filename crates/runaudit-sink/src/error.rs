//! Error types for delivery.

use thiserror::Error;

/// Errors that can occur while delivering an audit record.
///
/// All variants are retried by the retry controller up to its fixed budget,
/// then surfaced unchanged.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The record failed to serialize.
    #[error("failed to serialize audit record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Transport failure: connection, timeout, or response-body read.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The audit proxy answered with a non-OK status.
    #[error("audit proxy returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The index store rejected the document.
    #[error("index request rejected with status {status}: {body}")]
    IndexRejected { status: u16, body: String },

    /// Database failure at the stored-procedure boundary.
    #[error("database failure: {0}")]
    Database(#[from] sqlx::Error),

    /// The stored procedure ran but did not insert the expected row.
    #[error("stored procedure affected {actual} rows, expected {expected}")]
    RowCount { expected: u64, actual: u64 },
}
