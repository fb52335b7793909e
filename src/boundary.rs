use std::fmt;

/// Non-fatal conditions met while building a release.
/// These never abort the run but should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Commit lines that were dropped during classification
    SkippedCommits { no_email: usize, unmatched: usize },
    /// The range produced nothing worth a release note
    NoQualifyingCommits { from: String, to: String },
    /// The freshly created tag could not be removed after a failure
    RollbackFailed { tag: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::SkippedCommits {
                no_email,
                unmatched,
            } => {
                write!(
                    f,
                    "Skipped {} commit(s): {} without a known prefix, {} without an author email",
                    no_email + unmatched,
                    unmatched,
                    no_email
                )
            }
            BoundaryWarning::NoQualifyingCommits { from, to } => {
                write!(f, "No qualifying commits between '{}' and '{}'", from, to)
            }
            BoundaryWarning::RollbackFailed { tag, reason } => {
                write!(
                    f,
                    "Could not delete tag '{}' during rollback: {} (run `git tag --delete {}`)",
                    tag, reason, tag
                )
            }
        }
    }
}
