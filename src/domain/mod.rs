//! Domain logic - pure parsing and classification independent of git operations

pub mod commit;
pub mod prefix;
pub mod version;

pub use commit::{classify, classify_with_report, ClassifiedCommit, ClassifyReport};
pub use prefix::{PrefixRule, PrefixRules, DEFAULT_PREFIXES};
pub use version::{ResetPolicy, Version, VersionField};
