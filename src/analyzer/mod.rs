//! Analysis engine for choosing the version field to increment

pub mod hotfix;
pub mod version_analyzer;

pub use hotfix::{is_hotfix, HotfixDetector};
pub use version_analyzer::{VersionAnalyzer, VersionDecision};
