use regex::Regex;

use crate::domain::commit::strip_leading_brackets;
use crate::error::{AutoVersionError, Result};

/// True when the operator forced a hotfix or any subject starts with `hotfix`.
///
/// The token is matched case-insensitively, may carry a ticket number
/// (`hotfix-12`) and may be wrapped in a single pair of brackets
/// (`[hotfix] ...`), the same shapes the commit classifier accepts.
pub fn is_hotfix(commit_subjects: &[String], explicit_flag: bool) -> bool {
    if explicit_flag {
        return true;
    }
    match HotfixDetector::new(&["hotfix".to_string()]) {
        Ok(detector) => detector.detect(commit_subjects),
        Err(_) => false,
    }
}

/// Hotfix trigger matcher for a configurable set of tokens
#[derive(Debug, Clone)]
pub struct HotfixDetector {
    pattern: Option<Regex>,
}

impl HotfixDetector {
    pub fn new(triggers: &[String]) -> Result<Self> {
        let tokens: Vec<String> = triggers
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();

        if tokens.is_empty() {
            return Ok(HotfixDetector { pattern: None });
        }

        let alternation = tokens.join("|");
        let pattern = format!(r"(?i)^(?:{})(?:[-_ ]?\d+)?\b", alternation);
        let pattern = Regex::new(&pattern)
            .map_err(|e| AutoVersionError::config(format!("Invalid hotfix trigger: {}", e)))?;
        Ok(HotfixDetector {
            pattern: Some(pattern),
        })
    }

    /// True if any subject starts with one of the trigger tokens
    pub fn detect(&self, commit_subjects: &[String]) -> bool {
        let Some(pattern) = &self.pattern else {
            return false;
        };
        commit_subjects
            .iter()
            .any(|subject| pattern.is_match(&strip_leading_brackets(subject.trim())))
    }

    /// Explicit flag or detected trigger
    pub fn is_hotfix(&self, commit_subjects: &[String], explicit_flag: bool) -> bool {
        explicit_flag || self.detect(commit_subjects)
    }
}
