use crate::error::{AutoVersionError, Result};
use std::fmt;

/// Three-field release version (`major.minor.release`).
///
/// `prefix_v` records whether the tag this value was parsed from carried a
/// leading `v`; it only affects formatting, never comparison of the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub release: u32,
    pub prefix_v: bool,
}

/// Which component of a [`Version`] an increment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionField {
    Major,
    Minor,
    Release,
}

/// What happens to the components below the incremented one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Lower components are left untouched (`1.2.3` -> minor -> `1.3.3`)
    #[default]
    Keep,
    /// Lower components drop to zero (`1.2.3` -> minor -> `1.3.0`)
    ResetLower,
}

impl Version {
    /// Create a new version without the `v` display prefix
    pub fn new(major: u32, minor: u32, release: u32) -> Self {
        Version {
            major,
            minor,
            release,
            prefix_v: false,
        }
    }

    /// Same numbers, rendered with a leading `v`
    pub fn with_prefix(mut self, prefix_v: bool) -> Self {
        self.prefix_v = prefix_v;
        self
    }

    /// Parse a tag such as `v1.2.3` or `1.2.3`.
    ///
    /// Exactly three dot-separated, all-digit components are required. A single
    /// leading `v` is accepted and remembered for formatting.
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        let (prefix_v, numbers) = match trimmed.strip_prefix('v') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let parts: Vec<&str> = numbers.split('.').collect();
        if parts.len() != 3 {
            return Err(AutoVersionError::malformed(format!(
                "'{}' - expected major.minor.release",
                tag
            )));
        }

        let major = parse_component(tag, "major", parts[0])?;
        let minor = parse_component(tag, "minor", parts[1])?;
        let release = parse_component(tag, "release", parts[2])?;

        Ok(Version {
            major,
            minor,
            release,
            prefix_v,
        })
    }

    /// Returns a new version with `field` incremented by one and nothing else changed
    pub fn increment(&self, field: VersionField) -> Result<Self> {
        self.bump(field, ResetPolicy::Keep)
    }

    /// Increment `field`, applying `policy` to the lower components.
    ///
    /// Fails with [`AutoVersionError::MalformedVersion`] when the component is
    /// already at `u32::MAX`.
    pub fn bump(&self, field: VersionField, policy: ResetPolicy) -> Result<Self> {
        let mut next = *self;
        let reset = policy == ResetPolicy::ResetLower;
        match field {
            VersionField::Major => {
                next.major = bumped(self, "major", self.major)?;
                if reset {
                    next.minor = 0;
                    next.release = 0;
                }
            }
            VersionField::Minor => {
                next.minor = bumped(self, "minor", self.minor)?;
                if reset {
                    next.release = 0;
                }
            }
            VersionField::Release => {
                next.release = bumped(self, "release", self.release)?;
            }
        }
        Ok(next)
    }

    /// True when both versions carry the same numbers, ignoring the display prefix
    pub fn same_numbers(&self, other: &Version) -> bool {
        self.triple() == other.triple()
    }

    fn triple(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.release)
    }
}

fn bumped(version: &Version, name: &str, value: u32) -> Result<u32> {
    value.checked_add(1).ok_or_else(|| {
        AutoVersionError::malformed(format!(
            "'{}' - {} component cannot be incremented past {}",
            version,
            name,
            u32::MAX
        ))
    })
}

fn parse_component(tag: &str, name: &str, part: &str) -> Result<u32> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(AutoVersionError::malformed(format!(
            "'{}' - invalid {} component '{}'",
            tag, name, part
        )));
    }
    part.parse::<u32>().map_err(|_| {
        AutoVersionError::malformed(format!(
            "'{}' - {} component '{}' is out of range",
            tag, name, part
        ))
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix_v {
            write!(f, "v")?;
        }
        write!(f, "{}.{}.{}", self.major, self.minor, self.release)
    }
}

impl std::str::FromStr for Version {
    type Err = AutoVersionError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}
