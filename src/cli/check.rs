//! Default command: check syntax dumps and report findings

use super::Cli;
use crate::config::{load_config_file, load_lint_config, LintConfig, RuleSet};
use crate::models::Severity;
use crate::reporters::{self, OutputFormat};
use crate::rules::RuleEngine;

use anyhow::{Context, Result};
use console::style;
use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use tracing::debug;

/// File name suffix of the syntax dumps emitted by the front-end
pub(crate) const DUMP_SUFFIX: &str = ".ast.json";

/// Exit code when a `--fail-on` threshold is met
const EXIT_FINDINGS: u8 = 1;
/// Exit code when some dumps could not be analyzed
const EXIT_DUMP_FAILURES: u8 = 2;

pub(super) fn run(cli: &Cli) -> Result<ExitCode> {
    for path in &cli.paths {
        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
    }

    let config = load_config(cli)?;
    let rule_set = RuleSet::from_config(&config).context("Invalid rule configuration")?;
    if !rule_set.disabled().is_empty() {
        debug!("Disabled rules: {}", rule_set.disabled().join(", "));
    }

    let format_name = cli
        .format
        .clone()
        .or_else(|| config.defaults.format.clone())
        .unwrap_or_else(|| "text".to_string());
    let format = OutputFormat::from_str(&format_name)?;

    let fail_on = cli
        .fail_on
        .clone()
        .or_else(|| config.defaults.fail_on.clone())
        .map(|s| Severity::from_str(&s).map_err(anyhow::Error::msg))
        .transpose()
        .context("Invalid fail_on threshold")?;

    let workers = cli.workers.or(config.defaults.workers).unwrap_or(0);

    let dumps = collect_dumps(&cli.paths, config.exclude_patterns())?;
    debug!("Found {} syntax dumps", dumps.len());

    let engine = RuleEngine::new(rule_set).with_workers(workers);
    let run = engine.check_dumps(&dumps);

    let color = cli.output.is_none() && console::colors_enabled();
    let rendered = reporters::render(&run.report, format, color)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!(
                "{} Report written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    for failure in &run.failures {
        eprintln!("{} {}", style("skipped").yellow(), failure);
    }

    if let Some(threshold) = fail_on {
        if run.report.has_findings_at(threshold) {
            eprintln!("Failing due to --fail-on={} threshold", threshold);
            return Ok(ExitCode::from(EXIT_FINDINGS));
        }
    }
    if !run.failures.is_empty() {
        eprintln!(
            "{} of {} dumps could not be analyzed",
            run.failures.len(),
            dumps.len()
        );
        return Ok(ExitCode::from(EXIT_DUMP_FAILURES));
    }
    Ok(ExitCode::SUCCESS)
}

/// Explicit `--config` file, else the project config next to the first path
fn load_config(cli: &Cli) -> Result<LintConfig> {
    if let Some(path) = &cli.config {
        return load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let root = cli
        .paths
        .first()
        .map(|p| if p.is_dir() { p.as_path() } else { p.parent().unwrap_or(Path::new(".")) })
        .unwrap_or(Path::new("."));
    let root = if root.as_os_str().is_empty() {
        Path::new(".")
    } else {
        root
    };
    Ok(load_lint_config(root)?)
}

/// Collect syntax dumps under `paths`, respecting .gitignore and exclude globs.
///
/// Files named explicitly are always included. Results are sorted and
/// deduplicated so reports are stable across runs.
pub(crate) fn collect_dumps(paths: &[PathBuf], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let mut dumps = Vec::new();

    for root in paths {
        if root.is_file() {
            dumps.push(root.clone());
            continue;
        }

        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .require_git(false)
            .overrides(exclude_overrides(root, exclude)?);

        for entry in builder.build().flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_dump = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(DUMP_SUFFIX));
            if is_dump {
                dumps.push(path.to_path_buf());
            }
        }
    }

    dumps.sort();
    dumps.dedup();
    Ok(dumps)
}

/// Exclude globs become negated overrides, so everything else stays visible
fn exclude_overrides(root: &Path, exclude: &[String]) -> Result<Override> {
    let mut builder = OverrideBuilder::new(root);
    for pattern in exclude {
        builder
            .add(&format!("!{}", pattern))
            .with_context(|| format!("Invalid exclude pattern '{}'", pattern))?;
    }
    Ok(builder.build()?)
}
