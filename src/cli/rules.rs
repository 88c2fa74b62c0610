//! Rules command - list the built-in rules

use crate::rules::{builtin_rules, Rule};
use console::style;

/// Print every rule with its default severity and description
pub fn run() {
    let rules = builtin_rules();
    let width = rules.iter().map(|r| r.id().len()).max().unwrap_or(0);

    println!("\n{} rules\n", style(rules.len()).bold());
    for rule in &rules {
        println!("{}", format_rule(rule.as_ref(), width));
    }
    println!(
        "\n{} needs resolved symbols in the syntax dump",
        style("*").dim()
    );
}

fn format_rule(rule: &dyn Rule, width: usize) -> String {
    let marker = if rule.requires_symbol_resolution() {
        "*"
    } else {
        " "
    };
    format!(
        "  {:<width$}{} {:<7}  {}",
        rule.id(),
        marker,
        rule.default_severity().to_string(),
        rule.description(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{CheckboxLabelRule, ImageDescriptionRule};

    #[test]
    fn test_format_rule_marks_resolution() {
        let line = format_rule(&ImageDescriptionRule, 30);
        assert!(line.starts_with("  image-content-description     * warning"));

        let line = format_rule(&CheckboxLabelRule, 36);
        assert!(line.contains("checkbox-missing-accessibility-label  warning"));
    }
}
