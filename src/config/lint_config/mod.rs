//! Project-level configuration support
//!
//! Loads configuration from `a11ylint.toml` or `.a11ylintrc.json` in the
//! project root, or from an explicit path.
//!
//! # Configuration Format
//!
//! ```toml
//! # a11ylint.toml
//!
//! [rules.clickable-element-missing-accessibility-label]
//! severity = "info"
//! options = { max_owner_hops = 6 }
//!
//! [rules.checkbox-missing-accessibility-label]
//! enabled = false
//!
//! [exclude]
//! paths = ["build/generated/**"]
//!
//! [defaults]
//! format = "text"
//! fail_on = "warning"
//! workers = 8
//! ```
//!
//! Rule keys may also be written in snake_case or as class-style names
//! (`CheckboxMissingAccessibilityLabel`).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Config files looked up in the project root, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["a11ylint.toml", ".a11ylintrc.json"];

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unknown rule '{0}' in configuration (run `a11ylint rules` for the list)")]
    UnknownRule(String),

    #[error("rule '{rule}' is configured twice (as '{first}' and '{second}')")]
    DuplicateRule {
        rule: String,
        first: String,
        second: String,
    },

    #[error("invalid severity '{value}' for rule '{rule}' (expected 'warning' or 'info')")]
    InvalidSeverity { rule: String, value: String },

    #[error("unknown option '{option}' for rule '{rule}'")]
    UnknownOption { rule: String, option: String },

    #[error("invalid value for option '{option}' of rule '{rule}': {reason}")]
    InvalidOption {
        rule: String,
        option: String,
        reason: String,
    },
}

/// Project-level configuration loaded from a11ylint.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// Per-rule configuration overrides
    #[serde(default)]
    pub rules: HashMap<String, RuleConfigOverride>,

    /// Path exclusion patterns
    #[serde(default)]
    pub exclude: ExcludeConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Configuration override for a specific rule
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RuleConfigOverride {
    /// Whether the rule is enabled (default: true)
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Override the default severity (warning, info)
    #[serde(default)]
    pub severity: Option<String>,

    /// Rule-specific options, e.g. `max_owner_hops`
    #[serde(default)]
    pub options: RuleOptions,
}

pub type RuleOptions = HashMap<String, OptionValue>;

/// An option value can be an integer, float, boolean or string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl OptionValue {
    /// Get as i64 (floats only when they are whole numbers)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(v) => Some(*v),
            OptionValue::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }
}

/// Path exclusion configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ExcludeConfig {
    /// Glob patterns (gitignore syntax) of dumps to skip
    #[serde(default)]
    pub paths: Vec<String>,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CliDefaults {
    /// Default output format (text, json, sarif)
    #[serde(default)]
    pub format: Option<String>,

    /// Fail-on severity threshold for CI
    #[serde(default)]
    pub fail_on: Option<String>,

    /// Default number of workers
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Load project configuration from the project root.
///
/// Searches for `a11ylint.toml`, then `.a11ylintrc.json`. Returns the default
/// configuration if neither exists; a file that exists but does not parse is
/// an error.
pub fn load_lint_config(root: &Path) -> Result<LintConfig, ConfigError> {
    for name in CONFIG_FILE_NAMES {
        let path = root.join(name);
        if path.is_file() {
            let config = load_config_file(&path)?;
            debug!("Loaded config from {}", path.display());
            return Ok(config);
        }
    }

    debug!("No config found in {}, using defaults", root.display());
    Ok(LintConfig::default())
}

/// Load configuration from an explicit file; `.json` files are read as JSON,
/// everything else as TOML
pub fn load_config_file(path: &Path) -> Result<LintConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    } else {
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Normalize a rule name for config lookup
/// Converts various formats to kebab-case for matching
pub fn normalize_rule_id(name: &str) -> String {
    // CheckboxMissingAccessibilityLabel -> checkbox-missing-accessibility-label
    // ImageContentDescriptionRule -> image-content-description
    // image_content_description -> image-content-description
    let chars: Vec<char> = name.trim().chars().collect();
    let mut result = String::with_capacity(chars.len() + 8);

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_is_lower =
                i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let is_acronym_end = i > 0
                && chars[i - 1].is_uppercase()
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if prev_is_lower || is_acronym_end {
                result.push('-');
            }
            result.extend(c.to_lowercase());
        } else if *c == '_' {
            result.push('-');
        } else {
            result.push(*c);
        }
    }

    match result.strip_suffix("-rule") {
        Some(stripped) => stripped.to_string(),
        None => result,
    }
}

impl LintConfig {
    /// Parse TOML configuration text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    /// Exclusion globs for file discovery
    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude.paths
    }
}
