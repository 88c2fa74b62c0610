//! Init command - write a starter a11ylint.toml

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const CONFIG_FILE: &str = "a11ylint.toml";

const DEFAULT_CONFIG: &str = r#"# a11ylint configuration
#
# Rule names accept kebab-case, snake_case or class-style spelling
# (CheckboxMissingAccessibilityLabel). Unknown names are an error.

[rules.clickable-modifier-missing-on-click-label]
enabled = true
# severity = "info"

[rules.clickable-element-missing-accessibility-label]
enabled = true
# How many calls up from `.clickable` to look for the owning element
options = { max_owner_hops = 4 }

[rules.text-field-missing-accessibility-label]
enabled = true

[rules.icon-only-button-missing-accessibility-label]
enabled = true

# Needs resolved symbols in the syntax dump; skipped otherwise
[rules.image-content-description]
enabled = true

[rules.checkbox-missing-accessibility-label]
enabled = true

[exclude]
# Globs (gitignore syntax) of dumps to skip
paths = []

[defaults]
# format = "text"      # text, json, sarif
# fail_on = "warning"  # warning, info
# workers = 0          # 0 = one per core
"#;

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists; remove it first to regenerate",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;

    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!("\nNext steps:");
    println!("  {} Check the project", style("a11ylint .").cyan());
    println!("  {} See what each rule does", style("a11ylint rules").cyan());

    Ok(())
}
