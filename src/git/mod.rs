//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the version-control
//! side effects auto-version needs, so the release workflow can run against a
//! real repository or an in-memory mock.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: implementation backed by the `git2` crate
//! - [mock::MockRepository]: recording implementation for tests
//!
//! Refspecs are produced by small pure functions ([tag_refspec],
//! [branch_refspec]) instead of shared command templates.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Refspec used to fetch every tag from a remote
pub const TAGS_FETCH_REFSPEC: &str = "+refs/tags/*:refs/tags/*";

/// Commit information used to build log lines
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The commit hash
    pub hash: String,
    /// First line of the commit message
    pub summary: String,
    /// Author email
    pub email: String,
}

impl CommitInfo {
    /// `"<subject> (<email>)"`, the line format the classifier consumes
    pub fn log_line(&self) -> String {
        format!("{} ({})", self.summary, self.email)
    }
}

/// Push refspec for a tag
pub fn tag_refspec(tag: &str) -> String {
    format!("refs/tags/{0}:refs/tags/{0}", tag)
}

/// Push refspec for a local branch
pub fn branch_refspec(branch: &str) -> String {
    format!("refs/heads/{0}:refs/heads/{0}", branch)
}

/// Version-control collaborator used by the release workflow
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map their
/// underlying failures to [crate::error::AutoVersionError::Git] or
/// [crate::error::AutoVersionError::Remote]; a missing tag is reported as
/// [crate::error::AutoVersionError::NoTagFound].
pub trait Repository {
    /// Fetch all tags from `remote`
    fn fetch_tags(&self, remote: &str) -> Result<()>;

    /// Name of the most recent tag reachable from HEAD
    fn latest_tag(&self) -> Result<String>;

    /// One `"<subject> (<email>)"` line per commit in `from..to`, oldest first
    ///
    /// # Arguments
    /// * `from` - Revision excluded from the range (usually the previous tag)
    /// * `to` - Revision the range ends at (a tag or `HEAD`)
    fn list_commit_subjects(&self, from: &str, to: &str) -> Result<Vec<String>>;

    /// Create a lightweight tag on HEAD
    fn create_tag(&self, tag: &str) -> Result<()>;

    /// Delete a local tag
    fn delete_tag(&self, tag: &str) -> Result<()>;

    /// Push a tag to `remote`
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;

    /// Push the current branch to `remote` and set it as upstream.
    /// Returns the branch name.
    fn push_branch(&self, remote: &str) -> Result<String>;

    /// Stage `paths` (relative to the working directory) and commit them on HEAD
    fn add_and_commit(&self, paths: &[PathBuf], message: &str) -> Result<()>;

    /// Root of the working tree
    fn workdir(&self) -> Result<PathBuf>;
}

/// Relative form of `path` under `root`, as expected by the git index
pub fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
