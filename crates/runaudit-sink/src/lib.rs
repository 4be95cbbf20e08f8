//! # runaudit-sink
//!
//! Delivery backends for the audit record, behind one contract:
//! serialize the record and transmit it, reporting success or a
//! [`DeliveryError`]. Three backends exist, selected by configuration:
//!
//! | backend | success condition |
//! |---|---|
//! | [`ProxySink`] | HTTP 200 from `POST <base>/report` |
//! | [`IndexSink`] | index response without an error envelope |
//! | [`ProcedureSink`] | stored procedure affects exactly one row |
//!
//! Sinks never retry internally; [`retry::with_retry`] layers the bounded
//! backoff schedule above the `deliver` call. Each attempt sets up and
//! tears down its own connection, so a broken session from one attempt
//! cannot poison the next.

pub mod error;
pub mod index;
pub mod procedure;
pub mod proxy;
pub mod retry;

pub use error::DeliveryError;
pub use index::IndexSink;
pub use procedure::ProcedureSink;
pub use proxy::ProxySink;
pub use retry::with_retry;

use async_trait::async_trait;
use runaudit_core::{AuditRecord, SinkConfig};

/// A delivery backend for audit records.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Serialize and transmit one record. One attempt, no internal retry.
    async fn deliver(&self, record: &AuditRecord) -> Result<(), DeliveryError>;
}

/// Build the sink selected by configuration.
pub fn create_sink(config: &SinkConfig) -> Box<dyn DeliverySink> {
    match config {
        SinkConfig::Proxy { base_url } => Box::new(ProxySink::new(base_url.clone())),
        SinkConfig::Index {
            url,
            index,
            username,
            password,
        } => Box::new(IndexSink::new(
            url.clone(),
            index.clone(),
            username.clone(),
            password.clone(),
        )),
        SinkConfig::Procedure { database_url } => {
            Box::new(ProcedureSink::new(database_url.clone()))
        }
    }
}
