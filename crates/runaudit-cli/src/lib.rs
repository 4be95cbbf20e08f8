//! # runaudit-cli
//!
//! The audit pipeline binary: collects record inputs, assembles the one
//! immutable [`runaudit_core::AuditRecord`] for this run, and delivers it
//! through the configured sink under the fixed retry schedule.

pub mod assemble;
pub mod error;

pub use assemble::assemble;
pub use error::PipelineError;
