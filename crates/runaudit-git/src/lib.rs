//! # runaudit-git
//!
//! Reads source-control provenance from a local git checkout: the current
//! commit, the current branch, and the canonical repository string.
//!
//! The extractor works directly on the `.git` directory rather than through
//! a git binary or library: the checkout produced by the workflow runner
//! has exactly one local branch, so the single file under `refs/heads` names
//! the branch and holds the commit, and the repository URL is scanned out of
//! the line-oriented `config` file.

pub mod error;

pub use error::GitError;

use std::fs;
use std::path::{Path, PathBuf};

/// Organizations whose repositories are recognized in the git config scan.
const ALLOWED_ORGS: &[&str] = &["navikt", "nais"];

/// Source-control provenance for one checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitContext {
    /// Commit checked out, from the single ref file's content.
    pub commit_sha1: String,

    /// Branch name, from the single ref file's name.
    pub branch: String,

    /// Canonical repository string, e.g. `github.com/navikt/pipeline.git`.
    pub repo: String,
}

impl GitContext {
    /// Read the full git context from a checkout root.
    ///
    /// Reading is idempotent: the same tree always yields the same context.
    pub fn read(repo_root: &Path) -> Result<Self, GitError> {
        let (branch, commit_sha1) = current_ref(&repo_root.join(".git/refs/heads"))?;
        let repo = repo_url(&repo_root.join(".git/config"))?;
        Ok(Self {
            commit_sha1,
            branch,
            repo,
        })
    }
}

/// Resolve the current (branch, commit) pair from the heads-refs directory.
///
/// The directory must contain exactly one ref file. Zero refs means the
/// checkout is unusable ([`GitError::NoRef`]); more than one means the
/// current branch cannot be determined from directory listing order alone,
/// which is rejected rather than guessed ([`GitError::AmbiguousRefs`]).
fn current_ref(heads_dir: &Path) -> Result<(String, String), GitError> {
    let mut refs: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(heads_dir).map_err(|source| GitError::HeadsUnreadable {
        path: heads_dir.to_path_buf(),
        source,
    })? {
        let entry = entry.map_err(|source| GitError::HeadsUnreadable {
            path: heads_dir.to_path_buf(),
            source,
        })?;
        refs.push(entry.path());
    }

    match refs.as_slice() {
        [] => Err(GitError::NoRef {
            path: heads_dir.to_path_buf(),
        }),
        [ref_file] => {
            let branch = ref_file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| GitError::NoRef {
                    path: heads_dir.to_path_buf(),
                })?;
            let content = fs::read_to_string(ref_file).map_err(|source| {
                GitError::HeadsUnreadable {
                    path: ref_file.clone(),
                    source,
                }
            })?;
            Ok((branch, content.trim_end_matches('\n').to_string()))
        }
        many => Err(GitError::AmbiguousRefs {
            path: heads_dir.to_path_buf(),
            count: many.len(),
        }),
    }
}

/// Scan the git config for the first allow-listed repository URL.
fn repo_url(config_path: &Path) -> Result<String, GitError> {
    let config = fs::read_to_string(config_path).map_err(|source| GitError::ConfigUnreadable {
        path: config_path.to_path_buf(),
        source,
    })?;

    for line in config.lines() {
        if let Some(repo) = match_repo_line(line) {
            tracing::debug!(repo, "matched repository url in git config");
            return Ok(repo.to_string());
        }
    }

    Err(GitError::RepoUrlNotFound {
        path: config_path.to_path_buf(),
    })
}

/// Match one config line against `github.com/<allow-listed-org>/<repo>`.
///
/// Returns the tail of the line from `github.com/` onward, or `None` when
/// the line carries no recognized repository. Matches are all-or-nothing: a
/// line with an unknown organization or a missing repo segment never yields
/// a truncated result.
fn match_repo_line(line: &str) -> Option<&str> {
    const HOST: &str = "github.com/";

    let start = line.find(HOST)?;
    let tail = &line[start..];
    let (org, repo) = tail[HOST.len()..].split_once('/')?;
    if repo.is_empty() || !ALLOWED_ORGS.contains(&org) {
        return None;
    }
    Some(tail)
}
