//! Accessibility rules
//!
//! Each rule is a stateless evaluator invoked once per call node of a file:
//!
//! | Rule | Looks at | Passes when |
//! |---|---|---|
//! | [`ClickableLabelRule`] | `clickable` | `onClickLabel` is passed |
//! | [`ClickableContentRule`] | `clickable` | `onClickLabel`, or the owning element's content describes itself |
//! | [`TextFieldLabelRule`] | `TextField`, `OutlinedTextField` | `label`, or a semantics description |
//! | [`IconOnlyButtonRule`] | `Button`, `IconButton` with a single image child | the image or the button is described |
//! | [`ImageDescriptionRule`] | resolved `androidx.compose.foundation.Image` | non-empty `contentDescription` |
//! | [`CheckboxLabelRule`] | `Checkbox` | a semantics description |
//!
//! The [`RuleEngine`] walks every tree once and applies the configured rules at
//! each call.

mod base;
mod engine;

pub mod checkbox_label;
pub mod clickable_content;
pub mod clickable_label;
pub mod descriptiveness;
pub mod icon_only_button;
pub mod image_description;
pub mod navigation;
pub mod text_field_label;

pub use base::{Rule, RuleContext};
pub use checkbox_label::CheckboxLabelRule;
pub use clickable_content::ClickableContentRule;
pub use clickable_label::ClickableLabelRule;
pub use engine::{DumpRun, RuleEngine};
pub use icon_only_button::IconOnlyButtonRule;
pub use image_description::ImageDescriptionRule;
pub use text_field_label::TextFieldLabelRule;

use crate::config::{normalize_rule_id, ConfigError, RuleOptions};
use std::sync::Arc;

/// Ids of all built-in rules, in evaluation order
pub const RULE_IDS: [&str; 6] = [
    clickable_label::ID,
    clickable_content::ID,
    text_field_label::ID,
    icon_only_button::ID,
    image_description::ID,
    checkbox_label::ID,
];

/// Former names still accepted in configuration
const RULE_ALIASES: &[(&str, &str)] = &[(
    "text-field-missing-label-or-content-description",
    text_field_label::ID,
)];

/// All built-in rules with default options
pub fn builtin_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(ClickableLabelRule),
        Arc::new(ClickableContentRule::default()),
        Arc::new(TextFieldLabelRule),
        Arc::new(IconOnlyButtonRule),
        Arc::new(ImageDescriptionRule),
        Arc::new(CheckboxLabelRule),
    ]
}

/// Canonical id for a configured rule name
///
/// Accepts kebab-case, snake_case and class-style names
/// (`CheckboxMissingAccessibilityLabel`, `ImageContentDescriptionRule`).
pub fn resolve_rule_id(name: &str) -> Option<&'static str> {
    let normalized = normalize_rule_id(name);
    RULE_IDS
        .iter()
        .copied()
        .find(|id| *id == normalized)
        .or_else(|| {
            RULE_ALIASES
                .iter()
                .find(|(alias, _)| *alias == normalized)
                .map(|(_, id)| *id)
        })
}

/// Build one rule from its configured options
pub fn create_rule(id: &str, options: &RuleOptions) -> Result<Arc<dyn Rule>, ConfigError> {
    let rule: Arc<dyn Rule> = match id {
        clickable_label::ID => Arc::new(ClickableLabelRule),
        clickable_content::ID => Arc::new(ClickableContentRule::from_options(options)?),
        text_field_label::ID => Arc::new(TextFieldLabelRule),
        icon_only_button::ID => Arc::new(IconOnlyButtonRule),
        image_description::ID => Arc::new(ImageDescriptionRule),
        checkbox_label::ID => Arc::new(CheckboxLabelRule),
        other => return Err(ConfigError::UnknownRule(other.to_string())),
    };

    let mut keys: Vec<&String> = options.keys().collect();
    keys.sort();
    if let Some(unknown) = keys
        .into_iter()
        .find(|key| !rule.accepted_options().contains(&key.as_str()))
    {
        return Err(ConfigError::UnknownOption {
            rule: id.to_string(),
            option: unknown.clone(),
        });
    }
    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptionValue;

    #[test]
    fn test_registry_matches_ids() {
        let ids: Vec<&str> = builtin_rules().iter().map(|r| r.id()).collect();
        assert_eq!(ids, RULE_IDS);
    }

    #[test]
    fn test_resolve_rule_id_forms() {
        assert_eq!(
            resolve_rule_id("ClickableModifierMissingOnClickLabelRule"),
            Some(clickable_label::ID)
        );
        assert_eq!(
            resolve_rule_id("ClickableElementMissingAccessibilityLabel"),
            Some(clickable_content::ID)
        );
        assert_eq!(
            resolve_rule_id("image_content_description"),
            Some(image_description::ID)
        );
        assert_eq!(
            resolve_rule_id("checkbox-missing-accessibility-label"),
            Some(checkbox_label::ID)
        );
        assert_eq!(
            resolve_rule_id("TextFieldMissingLabelOrContentDescriptionRule"),
            Some(text_field_label::ID)
        );
        assert_eq!(resolve_rule_id("god-class"), None);
    }

    #[test]
    fn test_create_rule_rejects_unknown_option() {
        let mut options = RuleOptions::new();
        options.insert("max_owner_hops".into(), OptionValue::Integer(2));
        assert!(create_rule(clickable_content::ID, &options).is_ok());

        let err = create_rule(checkbox_label::ID, &options).err().expect("unknown option");
        assert!(matches!(err, ConfigError::UnknownOption { .. }));
        assert!(create_rule("nope", &RuleOptions::new()).is_err());
    }

    #[test]
    fn test_only_image_rule_needs_resolution() {
        let needing: Vec<&str> = builtin_rules()
            .iter()
            .filter(|r| r.requires_symbol_resolution())
            .map(|r| r.id())
            .collect();
        assert_eq!(needing, vec![image_description::ID]);
    }
}
