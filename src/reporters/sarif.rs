//! SARIF 2.1.0 reporter for GitHub Code Scanning and VS Code integration
//!
//! Generates SARIF (Static Analysis Results Interchange Format) output
//! compliant with OASIS SARIF 2.1.0 specification.
//!
//! Reference: https://docs.oasis-open.org/sarif/sarif/v2.1.0/sarif-v2.1.0.html

use crate::models::{AnalysisReport, FileReport, Finding, Severity};
use crate::rules::{builtin_rules, Rule};
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// SARIF schema URI
const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

const FINGERPRINT_KEY: &str = "a11ylint/v1";

/// Map severity to SARIF level
fn severity_to_sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "warning",
        Severity::Info => "note",
    }
}

// ============================================================================
// SARIF Data Structures
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
    invocations: Vec<SarifInvocation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule {
    id: String,
    short_description: SarifMessage,
    default_configuration: SarifConfiguration,
    properties: SarifRuleProperties,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifConfiguration {
    level: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRuleProperties {
    tags: Vec<String>,
    requires_symbol_resolution: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule_index: Option<usize>,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
    partial_fingerprints: HashMap<String, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
    region: SarifRegion,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifArtifactLocation {
    uri: String,
    uri_base_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRegion {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    byte_offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    byte_length: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifInvocation {
    execution_successful: bool,
    end_time_utc: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_execution_notifications: Vec<SarifNotification>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifNotification {
    level: String,
    message: SarifMessage,
    descriptor: SarifDescriptor,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    locations: Vec<SarifNotificationLocation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifNotificationLocation {
    physical_location: SarifArtifactOnly,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifArtifactOnly {
    artifact_location: SarifArtifactLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDescriptor {
    id: String,
}

// ============================================================================
// Implementation
// ============================================================================

/// Render report as SARIF 2.1.0 JSON
pub fn render(report: &AnalysisReport) -> Result<String> {
    let sarif = build_sarif(report);
    Ok(serde_json::to_string_pretty(&sarif)?)
}

fn build_sarif(report: &AnalysisReport) -> SarifReport {
    let registered = builtin_rules();
    let rules: Vec<SarifRule> = registered.iter().map(|r| build_rule(r.as_ref())).collect();
    let rule_index: HashMap<&str, usize> = registered
        .iter()
        .enumerate()
        .map(|(i, r)| (r.id(), i))
        .collect();

    let mut results = Vec::with_capacity(report.summary.total);
    let mut notifications = Vec::new();
    for file in &report.files {
        let mut occurrences: HashMap<(&str, &str), usize> = HashMap::new();
        for finding in &file.findings {
            let seen = occurrences
                .entry((finding.rule_id.as_str(), finding.message.as_str()))
                .or_default();
            results.push(build_result(
                file,
                finding,
                rule_index.get(finding.rule_id.as_str()).copied(),
                *seen,
            ));
            *seen += 1;
        }
        for skipped in &file.skipped_rules {
            notifications.push(SarifNotification {
                level: "note".to_string(),
                message: SarifMessage {
                    text: format!("{} was not run: {}", skipped.rule_id, skipped.reason),
                },
                descriptor: SarifDescriptor {
                    id: skipped.rule_id.clone(),
                },
                locations: vec![SarifNotificationLocation {
                    physical_location: SarifArtifactOnly {
                        artifact_location: artifact(file),
                    },
                }],
            });
        }
    }

    SarifReport {
        schema: SARIF_SCHEMA.to_string(),
        version: SARIF_VERSION.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "a11ylint".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
            invocations: vec![SarifInvocation {
                execution_successful: true,
                end_time_utc: Utc::now().to_rfc3339(),
                tool_execution_notifications: notifications,
            }],
        }],
    }
}

fn build_rule(rule: &dyn Rule) -> SarifRule {
    SarifRule {
        id: rule.id().to_string(),
        short_description: SarifMessage {
            text: rule.description().to_string(),
        },
        default_configuration: SarifConfiguration {
            level: severity_to_sarif_level(rule.default_severity()).to_string(),
        },
        properties: SarifRuleProperties {
            tags: vec!["accessibility".to_string()],
            requires_symbol_resolution: rule.requires_symbol_resolution(),
        },
    }
}

fn artifact(file: &FileReport) -> SarifArtifactLocation {
    SarifArtifactLocation {
        uri: file.path.to_string_lossy().replace('\\', "/"),
        uri_base_id: "%SRCROOT%".to_string(),
    }
}

fn build_result(
    file: &FileReport,
    finding: &Finding,
    rule_index: Option<usize>,
    occurrence: usize,
) -> SarifResult {
    let span = finding.span;
    let region = SarifRegion {
        start_line: span.has_position().then_some(span.line),
        start_column: (span.has_position() && span.column > 0).then_some(span.column),
        // Placeholder spans have no byte range to point at
        byte_offset: (!span.synthetic).then_some(span.start),
        byte_length: (!span.synthetic).then(|| span.end.saturating_sub(span.start)),
    };

    let mut partial_fingerprints = HashMap::new();
    partial_fingerprints.insert(
        FINGERPRINT_KEY.to_string(),
        fingerprint(file, finding, occurrence),
    );

    SarifResult {
        rule_id: finding.rule_id.clone(),
        rule_index,
        level: severity_to_sarif_level(finding.severity).to_string(),
        message: SarifMessage {
            text: finding.message.clone(),
        },
        locations: vec![SarifLocation {
            physical_location: SarifPhysicalLocation {
                artifact_location: artifact(file),
                region,
            },
        }],
        partial_fingerprints,
    }
}

/// Stable across edits that only move code: hashes the file, rule, message
/// and the how-many-th identical finding this is, not the position.
fn fingerprint(file: &FileReport, finding: &Finding, occurrence: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(file.path.to_string_lossy().as_bytes());
    hasher.update([0u8]);
    hasher.update(finding.rule_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(finding.message.as_bytes());
    hasher.update([0u8]);
    hasher.update(occurrence.to_le_bytes());
    format!("{:x}", hasher.finalize())
}
