//! Error types for git context extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading checkout metadata.
#[derive(Debug, Error)]
pub enum GitError {
    /// The heads-refs directory (or a ref file within it) could not be read.
    #[error("failed to read {path}: {source}")]
    HeadsUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The heads-refs directory contains no ref file.
    #[error("no ref found under {path}")]
    NoRef { path: PathBuf },

    /// More than one ref file exists, so the current branch is ambiguous.
    #[error("{count} refs found under {path}, expected exactly one")]
    AmbiguousRefs { path: PathBuf, count: usize },

    /// The git config file could not be read.
    #[error("failed to read git config {path}: {source}")]
    ConfigUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No allow-listed repository URL was found in the git config.
    #[error("no recognized repository url in {path}")]
    RepoUrlNotFound { path: PathBuf },
}
