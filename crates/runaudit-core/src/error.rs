//! Error types for the collection stage.

use thiserror::Error;

/// Errors raised while collecting record inputs, before any delivery attempt.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// A required environment variable is absent.
    #[error("missing required environment variable {name}")]
    MissingEnv { name: &'static str },

    /// The configured sink backend is not one of the known kinds.
    #[error("unknown audit sink backend '{0}' (expected proxy, index or procedure)")]
    UnknownSink(String),

    /// A required record field ended up empty after collection.
    #[error("audit record field '{field}' is empty")]
    EmptyField { field: &'static str },

    /// No usable host address could be discovered.
    #[error("no usable host ip address: {0}")]
    HostIp(String),
}
