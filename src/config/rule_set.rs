//! Validated rule configuration for one run

use super::lint_config::{ConfigError, LintConfig, RuleConfigOverride, RuleOptions};
use crate::models::Severity;
use crate::rules::{self, Rule};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A rule together with its configured severity override
#[derive(Clone)]
pub struct ConfiguredRule {
    rule: Arc<dyn Rule>,
    severity_override: Option<Severity>,
}

impl ConfiguredRule {
    pub fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }

    pub fn id(&self) -> &'static str {
        self.rule.id()
    }

    /// Replaces the severity of every finding of this rule when set
    pub fn severity_override(&self) -> Option<Severity> {
        self.severity_override
    }
}

/// Immutable snapshot of the enabled rules, built once before traversal and
/// shared read-only by all workers
#[derive(Clone)]
pub struct RuleSet {
    rules: Vec<ConfiguredRule>,
    disabled: Vec<&'static str>,
}

impl Default for RuleSet {
    /// Every built-in rule, default options and severities
    fn default() -> Self {
        Self {
            rules: rules::builtin_rules()
                .into_iter()
                .map(|rule| ConfiguredRule {
                    rule,
                    severity_override: None,
                })
                .collect(),
            disabled: Vec::new(),
        }
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules.iter().map(|r| r.id()).collect::<Vec<_>>())
            .field("disabled", &self.disabled)
            .finish()
    }
}

impl RuleSet {
    /// Validate configuration and build the rule snapshot
    ///
    /// Fails on unknown rule names, a rule configured twice under different
    /// spellings, invalid severities and unknown or invalid options.
    pub fn from_config(config: &LintConfig) -> Result<Self, ConfigError> {
        let mut keys: Vec<&String> = config.rules.keys().collect();
        keys.sort();

        let mut by_id: HashMap<&'static str, (&str, &RuleConfigOverride)> = HashMap::new();
        for key in keys {
            let id =
                rules::resolve_rule_id(key).ok_or_else(|| ConfigError::UnknownRule(key.clone()))?;
            let settings = &config.rules[key];
            if let Some((first, _)) = by_id.insert(id, (key.as_str(), settings)) {
                return Err(ConfigError::DuplicateRule {
                    rule: id.to_string(),
                    first: first.to_string(),
                    second: key.clone(),
                });
            }
        }

        let no_options = RuleOptions::new();
        let mut rules = Vec::new();
        let mut disabled = Vec::new();
        for id in rules::RULE_IDS {
            let settings = by_id.get(id).map(|(_, settings)| *settings);

            let severity_override = settings
                .and_then(|s| s.severity.as_deref())
                .map(|value| {
                    value
                        .parse::<Severity>()
                        .map_err(|_| ConfigError::InvalidSeverity {
                            rule: id.to_string(),
                            value: value.to_string(),
                        })
                })
                .transpose()?;

            // Options of disabled rules are validated too
            let rule = rules::create_rule(id, settings.map_or(&no_options, |s| &s.options))?;

            if settings.and_then(|s| s.enabled).unwrap_or(true) {
                rules.push(ConfiguredRule {
                    rule,
                    severity_override,
                });
            } else {
                debug!("Rule {} disabled by configuration", id);
                disabled.push(id);
            }
        }

        debug!("{} rules enabled, {} disabled", rules.len(), disabled.len());
        Ok(Self { rules, disabled })
    }

    pub fn rules(&self) -> &[ConfiguredRule] {
        &self.rules
    }

    /// Ids of rules turned off by configuration
    pub fn disabled(&self) -> &[&'static str] {
        &self.disabled
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
