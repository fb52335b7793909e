use crate::analyzer::HotfixDetector;
use crate::config::Config;
use crate::domain::{ResetPolicy, Version, VersionField};
use crate::error::Result;

/// Outcome of analysing a commit range against the latest version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionDecision {
    pub current: Version,
    pub next: Version,
    pub field: VersionField,
    pub hotfix: bool,
}

/// Decides which version field to increment for a commit range
pub struct VersionAnalyzer {
    detector: HotfixDetector,
    policy: ResetPolicy,
}

impl VersionAnalyzer {
    /// Create a new version analyzer
    pub fn new(detector: HotfixDetector, policy: ResetPolicy) -> Self {
        VersionAnalyzer { detector, policy }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(VersionAnalyzer::new(
            HotfixDetector::new(&config.hotfix.triggers)?,
            config.version.reset_policy(),
        ))
    }

    /// `Release` for hotfix ranges, `Minor` otherwise
    pub fn bump_field(&self, subjects: &[String], explicit_hotfix: bool) -> VersionField {
        if self.detector.is_hotfix(subjects, explicit_hotfix) {
            VersionField::Release
        } else {
            VersionField::Minor
        }
    }

    /// Compute the next version from the current one and the raw subjects
    pub fn decide(
        &self,
        current: Version,
        subjects: &[String],
        explicit_hotfix: bool,
    ) -> Result<VersionDecision> {
        let field = self.bump_field(subjects, explicit_hotfix);
        Ok(VersionDecision {
            current,
            next: current.bump(field, self.policy)?,
            field,
            hotfix: field == VersionField::Release,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> VersionAnalyzer {
        VersionAnalyzer::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn test_minor_by_default() {
        let subjects = vec!["CB-1 - feature (a@b.com)".to_string()];
        let decision = analyzer()
            .decide(Version::parse("v1.2.3").unwrap(), &subjects, false)
            .unwrap();
        assert_eq!(decision.current.to_string(), "v1.2.3");
        assert_eq!(decision.field, VersionField::Minor);
        assert_eq!(decision.next.to_string(), "v1.3.3");
        assert!(!decision.hotfix);
    }

    #[test]
    fn test_hotfix_commit_bumps_release() {
        let subjects = vec![
            "CB-1 - feature (a@b.com)".to_string(),
            "[HOTFIX] crash (a@b.com)".to_string(),
        ];
        let decision = analyzer()
            .decide(Version::parse("1.2.3").unwrap(), &subjects, false)
            .unwrap();
        assert_eq!(decision.field, VersionField::Release);
        assert_eq!(decision.next.to_string(), "1.2.4");
        assert!(decision.hotfix);
    }

    #[test]
    fn test_explicit_hotfix() {
        let decision = analyzer().decide(Version::new(0, 4, 0), &[], true).unwrap();
        assert_eq!(decision.next, Version::new(0, 4, 1));
    }

    #[test]
    fn test_reset_policy_applies() {
        let mut config = Config::default();
        config.version.reset_lower_fields = true;
        let analyzer = VersionAnalyzer::from_config(&config).unwrap();
        let decision = analyzer.decide(Version::new(1, 2, 3), &[], false).unwrap();
        assert_eq!(decision.next, Version::new(1, 3, 0));
    }

    #[test]
    fn test_overflow_is_error() {
        let current = Version::new(1, u32::MAX, 0);
        assert!(analyzer().decide(current, &[], false).is_err());
        // a hotfix bump touches a different field and still works
        let decision = analyzer().decide(current, &[], true).unwrap();
        assert_eq!(decision.next, Version::new(1, u32::MAX, 1));
        assert_eq!(decision.current, current);
    }
}
