use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{PrefixRules, ResetPolicy, DEFAULT_PREFIXES};
use crate::error::{AutoVersionError, Result};
use crate::release_notes::ItemOrder;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "autoversion.toml";

/// Represents the complete configuration for auto-version.
///
/// Contains the remote, the ordered prefix table, hotfix triggers, version
/// policy, output paths and rendering options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<PrefixConfig>,

    #[serde(default)]
    pub hotfix: HotfixConfig,

    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

/// One entry of the ordered prefix table
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PrefixConfig {
    pub label: String,

    /// Regular expression overriding the pattern derived from `label`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Returns the default ordered prefix table.
fn default_prefixes() -> Vec<PrefixConfig> {
    DEFAULT_PREFIXES
        .iter()
        .map(|label| PrefixConfig {
            label: label.to_string(),
            pattern: None,
        })
        .collect()
}

fn default_triggers() -> Vec<String> {
    vec!["hotfix".to_string()]
}

/// Subject tokens that switch the bump from minor to release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HotfixConfig {
    #[serde(default = "default_triggers")]
    pub triggers: Vec<String>,
}

impl Default for HotfixConfig {
    fn default() -> Self {
        HotfixConfig {
            triggers: default_triggers(),
        }
    }
}

/// Version increment policy.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct VersionConfig {
    /// Zero the components below the incremented one
    #[serde(default)]
    pub reset_lower_fields: bool,
}

impl VersionConfig {
    pub fn reset_policy(&self) -> ResetPolicy {
        if self.reset_lower_fields {
            ResetPolicy::ResetLower
        } else {
            ResetPolicy::Keep
        }
    }
}

fn default_release_notes_dir() -> PathBuf {
    PathBuf::from("templates/contributors/release_notes")
}

fn default_history_file() -> PathBuf {
    PathBuf::from("templates/contributors/releases.md")
}

/// Where generated notes are written, relative to the repository root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "default_release_notes_dir")]
    pub release_notes_dir: PathBuf,

    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            release_notes_dir: default_release_notes_dir(),
            history_file: default_history_file(),
        }
    }
}

fn default_attribution() -> String {
    "(this is auto-generated)".to_string()
}

/// Release note rendering options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RenderConfig {
    #[serde(default)]
    pub item_order: ItemOrder,

    #[serde(default = "default_attribution")]
    pub attribution: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            item_order: ItemOrder::default(),
            attribution: default_attribution(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            prefixes: default_prefixes(),
            hotfix: HotfixConfig::default(),
            version: VersionConfig::default(),
            paths: PathsConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    /// Compile the prefix table
    pub fn prefix_rules(&self) -> Result<PrefixRules> {
        PrefixRules::from_config(&self.prefixes)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| AutoVersionError::config(e.to_string()))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `autoversion.toml` in current directory
/// 3. `.autoversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => locate_config(),
    };

    let Some(path) = path else {
        tracing::debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let text = fs::read_to_string(&path).map_err(|e| {
        AutoVersionError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    Config::from_toml(&text)
}

fn locate_config() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
        .filter(|path| path.exists())
}
