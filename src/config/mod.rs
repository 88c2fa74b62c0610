//! Configuration module for a11ylint
//!
//! This module handles:
//! - Project-level configuration (a11ylint.toml)
//! - Per-rule enable/disable, severity and option overrides
//! - CLI defaults
//! - The validated, immutable [`RuleSet`] handed to the engine

mod lint_config;
mod rule_set;

pub use lint_config::{
    load_config_file, load_lint_config, normalize_rule_id, CliDefaults, ConfigError,
    ExcludeConfig, LintConfig, OptionValue, RuleConfigOverride, RuleOptions, CONFIG_FILE_NAMES,
};
pub use rule_set::{ConfiguredRule, RuleSet};
