//! # runaudit-core
//!
//! Shared types for the workflow-run audit pipeline.
//!
//! This crate provides:
//! - [`AuditRecord`]: the single JSON document emitted per workflow run
//! - [`Config`]: the process configuration, built once from the environment
//! - [`RetryPolicy`]: the fixed backoff schedule used at the delivery boundary
//! - run-id timestamp extraction and host address discovery helpers

pub mod config;
pub mod error;
pub mod net;
pub mod record;
pub mod retry;
pub mod runid;

pub use config::{Config, SinkConfig};
pub use error::CollectionError;
pub use record::AuditRecord;
pub use retry::RetryPolicy;
