//! Text (terminal) reporter
//!
//! ```text
//! app/src/main/java/ui/Settings.kt
//!    8:5   warning  This Checkbox is missing a contentDescription.  checkbox-missing-accessibility-label
//!   14:21  info     The .clickable modifier is missing ...           clickable-modifier-missing-on-click-label
//!
//! 2 findings (1 warning, 1 info) in 1 of 2 files
//! skipped image-content-description in 1 of 2 files: symbol resolution unavailable for this file
//! ```
//!
//! Rule skips are grouped by rule, since a run without symbol resolution
//! skips the same rule in every file.

use crate::models::{AnalysisReport, FileReport, Severity};
use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Write;

/// ANSI escape codes, or nothing when colors are off
struct Palette {
    bold: &'static str,
    dim: &'static str,
    reset: &'static str,
    warning: &'static str,
    info: &'static str,
    ok: &'static str,
}

const ANSI: Palette = Palette {
    bold: "\x1b[1m",
    dim: "\x1b[2m",
    reset: "\x1b[0m",
    warning: "\x1b[33m", // Yellow
    info: "\x1b[34m",    // Blue
    ok: "\x1b[32m",      // Green
};

const PLAIN: Palette = Palette {
    bold: "",
    dim: "",
    reset: "",
    warning: "",
    info: "",
    ok: "",
};

impl Palette {
    fn severity(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }
}

/// Render report as terminal output
pub fn render(report: &AnalysisReport, color: bool) -> Result<String> {
    let p = if color { &ANSI } else { &PLAIN };
    let mut out = String::new();

    for file in &report.files {
        if file.findings.is_empty() {
            continue;
        }
        render_file(&mut out, file, p)?;
        out.push('\n');
    }

    let s = &report.summary;
    if s.total == 0 {
        writeln!(
            out,
            "{}{}No accessibility findings{} in {} files",
            p.ok, p.bold, p.reset, s.files_analyzed
        )?;
    } else {
        writeln!(
            out,
            "{}{} findings{} ({}{} warning{}, {}{} info{}) in {} of {} files",
            p.bold,
            s.total,
            p.reset,
            p.warning,
            s.warning,
            p.reset,
            p.info,
            s.info,
            p.reset,
            s.files_with_findings,
            s.files_analyzed
        )?;
    }

    let mut skipped: BTreeMap<&str, (usize, &str)> = BTreeMap::new();
    for rule in report.files.iter().flat_map(|f| &f.skipped_rules) {
        let entry = skipped
            .entry(rule.rule_id.as_str())
            .or_insert((0, rule.reason.as_str()));
        entry.0 += 1;
    }
    for (rule_id, (count, reason)) in skipped {
        writeln!(
            out,
            "{}skipped {} in {} of {} files: {}{}",
            p.dim, rule_id, count, s.files_analyzed, reason, p.reset
        )?;
    }

    Ok(out)
}

fn render_file(out: &mut String, file: &FileReport, p: &Palette) -> Result<()> {
    writeln!(out, "{}{}{}", p.bold, file.path.display(), p.reset)?;

    let locations: Vec<String> = file.findings.iter().map(|f| f.span.to_string()).collect();
    let width = locations.iter().map(String::len).max().unwrap_or(0);

    for (finding, location) in file.findings.iter().zip(&locations) {
        writeln!(
            out,
            "  {}{:>width$}{}  {}{:<7}{}  {}  {}{}{}",
            p.dim,
            location,
            p.reset,
            p.severity(finding.severity),
            finding.severity.to_string(),
            p.reset,
            finding.message,
            p.dim,
            finding.rule_id,
            p.reset,
        )?;
    }
    Ok(())
}
