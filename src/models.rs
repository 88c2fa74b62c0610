//! Core data models for a11ylint
//!
//! These models are shared by the rule engine, the reporters and the CLI.

use crate::syntax::Span;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Severity levels for findings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            other => Err(format!(
                "unknown severity '{}' (expected 'warning' or 'info')",
                other
            )),
        }
    }
}

/// One reported rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub severity: Severity,
    pub span: Span,
    pub message: String,
}

impl Finding {
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            span,
            message: message.into(),
        }
    }
}

/// A rule that did not inspect a file at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRule {
    pub rule_id: String,
    pub reason: String,
}

/// Outcome of analyzing one file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Findings in traversal (source) order
    pub findings: Vec<Finding>,
    /// Rules that were not run for this file; distinct from "ran and found nothing"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_rules: Vec<SkippedRule>,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn was_skipped(&self, rule_id: &str) -> bool {
        self.skipped_rules.iter().any(|s| s.rule_id == rule_id)
    }
}

/// Summary of findings by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingsSummary {
    pub warning: usize,
    pub info: usize,
    pub total: usize,
    pub files_analyzed: usize,
    pub files_with_findings: usize,
    /// Number of (file, rule) pairs that were skipped
    pub rule_skips: usize,
}

impl FindingsSummary {
    pub fn from_reports(files: &[FileReport]) -> Self {
        let mut summary = Self {
            files_analyzed: files.len(),
            ..Default::default()
        };
        for file in files {
            if !file.findings.is_empty() {
                summary.files_with_findings += 1;
            }
            summary.rule_skips += file.skipped_rules.len();
            for f in &file.findings {
                match f.severity {
                    Severity::Warning => summary.warning += 1,
                    Severity::Info => summary.info += 1,
                }
                summary.total += 1;
            }
        }
        summary
    }
}

/// Result of one lint run over many files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub files: Vec<FileReport>,
    pub summary: FindingsSummary,
}

impl AnalysisReport {
    pub fn new(files: Vec<FileReport>) -> Self {
        let summary = FindingsSummary::from_reports(&files);
        Self { files, summary }
    }

    /// All findings paired with their file, in report order
    pub fn findings(&self) -> impl Iterator<Item = (&FileReport, &Finding)> {
        self.files
            .iter()
            .flat_map(|file| file.findings.iter().map(move |f| (file, f)))
    }

    /// Whether any finding is at or above `threshold`
    pub fn has_findings_at(&self, threshold: Severity) -> bool {
        self.findings().any(|(_, f)| f.severity >= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> Finding {
        Finding::new("test-rule", severity, Span::default(), "message")
    }

    #[test]
    fn test_severity_parsing() {
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("WARN".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!(" info ".parse::<Severity>(), Ok(Severity::Info));
        assert!("critical".parse::<Severity>().is_err());
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_summary_counts() {
        let mut clean = FileReport::new("b.kt");
        clean.skipped_rules.push(SkippedRule {
            rule_id: "image-content-description".into(),
            reason: "no symbol resolution".into(),
        });
        let mut dirty = FileReport::new("a.kt");
        dirty.findings = vec![finding(Severity::Warning), finding(Severity::Info)];

        let report = AnalysisReport::new(vec![dirty, clean]);
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.warning, 1);
        assert_eq!(report.summary.info, 1);
        assert_eq!(report.summary.files_analyzed, 2);
        assert_eq!(report.summary.files_with_findings, 1);
        assert_eq!(report.summary.rule_skips, 1);
        assert!(report.files[1].was_skipped("image-content-description"));
    }

    #[test]
    fn test_fail_threshold() {
        let mut file = FileReport::new("a.kt");
        file.findings = vec![finding(Severity::Info)];
        let report = AnalysisReport::new(vec![file]);
        assert!(report.has_findings_at(Severity::Info));
        assert!(!report.has_findings_at(Severity::Warning));
    }
}
