use regex::Regex;

use crate::config::PrefixConfig;
use crate::error::{AutoVersionError, Result};

/// Team/category labels recognised when no configuration overrides them
pub const DEFAULT_PREFIXES: &[&str] = &["HOTFIX", "CB", "BOSS", "BOSSFIN", "OB"];

/// A team label together with the recognizer for it at the start of a subject
#[derive(Debug, Clone)]
pub struct PrefixRule {
    pub label: String,
    pattern: Regex,
}

impl PrefixRule {
    /// Build a rule whose pattern is derived from the label.
    ///
    /// The derived pattern is case-insensitive, allows an optional `-`, `_` or
    /// space followed by a ticket number, and requires a word boundary after
    /// the prefix so that `BOSS` does not match `BOSSFIN-1`.
    pub fn new(label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        let pattern = format!(r"(?i)^{}(?:[-_ ]?\d+)?\b", regex::escape(&label));
        Self::with_pattern(label, &pattern)
    }

    /// Build a rule from an explicit regular expression
    pub fn with_pattern(label: impl Into<String>, pattern: &str) -> Result<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(AutoVersionError::config("Prefix label must not be empty"));
        }
        let pattern = Regex::new(pattern).map_err(|e| {
            AutoVersionError::config(format!("Invalid pattern for prefix '{}': {}", label, e))
        })?;
        Ok(PrefixRule { label, pattern })
    }

    /// The matched prefix span, if the rule matches at the very start of `subject`
    pub fn match_prefix<'a>(&self, subject: &'a str) -> Option<&'a str> {
        self.pattern
            .find(subject)
            .filter(|m| m.start() == 0 && !m.as_str().is_empty())
            .map(|m| m.as_str())
    }
}

/// Ordered rule table evaluated first-match-wins
#[derive(Debug, Clone)]
pub struct PrefixRules {
    rules: Vec<PrefixRule>,
}

impl PrefixRules {
    pub fn new(rules: Vec<PrefixRule>) -> Self {
        PrefixRules { rules }
    }

    /// Compile the configured prefixes, keeping their configured order
    pub fn from_config(prefixes: &[PrefixConfig]) -> Result<Self> {
        let rules = prefixes
            .iter()
            .map(|p| match &p.pattern {
                Some(pattern) => PrefixRule::with_pattern(p.label.clone(), pattern),
                None => PrefixRule::new(p.label.clone()),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(PrefixRules { rules })
    }

    /// The first rule matching the start of `subject`, with the matched span
    pub fn first_match<'r, 's>(&'r self, subject: &'s str) -> Option<(&'r PrefixRule, &'s str)> {
        self.rules
            .iter()
            .find_map(|rule| rule.match_prefix(subject).map(|span| (rule, span)))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.label.as_str()).collect()
    }
}

impl Default for PrefixRules {
    fn default() -> Self {
        let rules = DEFAULT_PREFIXES
            .iter()
            .filter_map(|label| PrefixRule::new(*label).ok())
            .collect();
        PrefixRules { rules }
    }
}
