use crate::error::{AutoVersionError, Result};
use crate::git::Repository;
use std::cell::RefCell;
use std::path::PathBuf;

/// Mock repository for testing without actual git operations.
///
/// Every mutating call is recorded in order so tests can assert on the exact
/// sequence of side effects. A single operation can be made to fail with
/// [`MockRepository::fail_on`].
pub struct MockRepository {
    latest_tag: Option<String>,
    subjects: Vec<String>,
    branch: String,
    workdir: PathBuf,
    fail_on: Option<&'static str>,
    tags: RefCell<Vec<String>>,
    calls: RefCell<Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            latest_tag: None,
            subjects: Vec::new(),
            branch: "main".to_string(),
            workdir: PathBuf::from("."),
            fail_on: None,
            tags: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Set the tag reported as latest
    pub fn with_latest_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.tags.borrow_mut().push(tag.clone());
        self.latest_tag = Some(tag);
        self
    }

    /// Set the commit log lines returned for any range
    pub fn with_subjects(mut self, subjects: &[&str]) -> Self {
        self.subjects = subjects.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    /// Make the named operation (e.g. `"push_tag"`) return an error
    pub fn fail_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// Recorded calls, e.g. `["fetch_tags origin", "create_tag v1.3.0"]`
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Tags currently present
    pub fn tags(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }

    fn record(&self, operation: &'static str, detail: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(format!("{} {}", operation, detail).trim_end().to_string());
        if self.fail_on == Some(operation) {
            return Err(AutoVersionError::remote(format!(
                "{} failed (simulated)",
                operation
            )));
        }
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn fetch_tags(&self, remote: &str) -> Result<()> {
        self.record("fetch_tags", remote)
    }

    fn latest_tag(&self) -> Result<String> {
        self.record("latest_tag", "")?;
        self.latest_tag.clone().ok_or(AutoVersionError::NoTagFound)
    }

    fn list_commit_subjects(&self, from: &str, to: &str) -> Result<Vec<String>> {
        self.record("list_commit_subjects", &format!("{}..{}", from, to))?;
        Ok(self.subjects.clone())
    }

    fn create_tag(&self, tag: &str) -> Result<()> {
        self.record("create_tag", tag)?;
        self.tags.borrow_mut().push(tag.to_string());
        Ok(())
    }

    fn delete_tag(&self, tag: &str) -> Result<()> {
        self.record("delete_tag", tag)?;
        self.tags.borrow_mut().retain(|t| t != tag);
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.record("push_tag", &format!("{} {}", remote, tag))
    }

    fn push_branch(&self, remote: &str) -> Result<String> {
        self.record("push_branch", &format!("{} {}", remote, self.branch))?;
        Ok(self.branch.clone())
    }

    fn add_and_commit(&self, paths: &[PathBuf], message: &str) -> Result<()> {
        let files: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        self.record(
            "add_and_commit",
            &format!("[{}] {}", files.join(", "), message),
        )
    }

    fn workdir(&self) -> Result<PathBuf> {
        Ok(self.workdir.clone())
    }
}
