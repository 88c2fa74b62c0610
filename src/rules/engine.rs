//! Rule execution engine with parallel support
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      RuleEngine                      │
//! ├──────────────────────────────────────────────────────┤
//! │  1. Load + lower syntax dumps (parallel, rayon)      │
//! │  2. Build one RuleContext per file                   │
//! │  3. Skip rules whose preconditions are not met       │
//! │  4. Walk calls in pre-order, apply every rule        │
//! │  5. Collect per-file reports in input order          │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Files share nothing but the immutable [`RuleSet`], so they are processed
//! independently. Within a file, findings keep traversal order.

use super::base::RuleContext;
use super::navigation::collect_descendant_calls;
use crate::config::RuleSet;
use crate::models::{AnalysisReport, FileReport, SkippedRule};
use crate::syntax::{DumpError, ParsedFile, SourceFile, SymbolResolver, SyntaxTree};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

const NO_RESOLUTION_REASON: &str = "symbol resolution unavailable for this file";

/// Outcome of checking a batch of syntax dumps
#[derive(Debug, Default)]
pub struct DumpRun {
    pub report: AnalysisReport,
    /// Dumps that could not be read or parsed; the rest of the batch still ran
    pub failures: Vec<DumpError>,
}

/// Applies a [`RuleSet`] to syntax trees
pub struct RuleEngine {
    rule_set: RuleSet,
    /// Number of worker threads for parallel execution
    workers: usize,
}

impl RuleEngine {
    pub fn new(rule_set: RuleSet) -> Self {
        Self {
            rule_set,
            workers: resolve_workers(0),
        }
    }

    /// Set the worker count (0 = auto-detect)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = resolve_workers(workers);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    pub fn check_file(&self, file: &ParsedFile) -> FileReport {
        self.check_tree(&file.path, &file.tree, file.resolver())
    }

    /// Run every enabled rule over one tree
    pub fn check_tree(
        &self,
        path: &Path,
        tree: &SyntaxTree,
        resolver: Option<&dyn SymbolResolver>,
    ) -> FileReport {
        let ctx = RuleContext::new(tree, resolver);
        let mut report = FileReport::new(path);

        let mut active = Vec::with_capacity(self.rule_set.len());
        for configured in self.rule_set.rules() {
            if configured.rule().requires_symbol_resolution() && !ctx.has_symbol_resolution() {
                debug!(
                    "{}: skipping {} ({})",
                    path.display(),
                    configured.id(),
                    NO_RESOLUTION_REASON
                );
                report.skipped_rules.push(SkippedRule {
                    rule_id: configured.id().to_string(),
                    reason: NO_RESOLUTION_REASON.to_string(),
                });
                continue;
            }
            active.push(configured);
        }

        for (id, call) in collect_descendant_calls(tree, tree.root()) {
            for configured in &active {
                let mut findings = configured.rule().check(id, call, &ctx);
                if let Some(severity) = configured.severity_override() {
                    for finding in &mut findings {
                        finding.severity = severity;
                    }
                }
                report.findings.extend(findings);
            }
        }

        debug!(
            "{}: {} findings from {} rules",
            path.display(),
            report.findings.len(),
            active.len()
        );
        report
    }

    /// Check already lowered files in parallel; reports keep input order
    pub fn check_files(&self, files: &[ParsedFile]) -> AnalysisReport {
        let reports: Vec<FileReport> =
            self.in_pool(|| files.par_iter().map(|f| self.check_file(f)).collect());
        AnalysisReport::new(reports)
    }

    /// Load, lower and check syntax dumps in parallel
    ///
    /// A dump that cannot be read or parsed is recorded in
    /// [`DumpRun::failures`] and does not stop the others.
    pub fn check_dumps(&self, paths: &[PathBuf]) -> DumpRun {
        let start = Instant::now();
        info!(
            "Checking {} dumps with {} rules on {} workers",
            paths.len(),
            self.rule_set.len(),
            self.workers
        );

        let results: Vec<Result<FileReport, DumpError>> = self.in_pool(|| {
            paths
                .par_iter()
                .map(|path| -> Result<FileReport, DumpError> {
                    let source = SourceFile::load(path)?;
                    Ok(self.check_file(&source.lower()))
                })
                .collect()
        });

        let mut reports = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(report) => reports.push(report),
                Err(e) => {
                    warn!("{}", e);
                    failures.push(e);
                }
            }
        }

        let report = AnalysisReport::new(reports);
        info!(
            "Checked {} files in {:?}: {} findings ({} skipped dumps)",
            report.summary.files_analyzed,
            start.elapsed(),
            report.summary.total,
            failures.len()
        );
        DumpRun { report, failures }
    }

    fn in_pool<T, F>(&self, op: F) -> T
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
        {
            Ok(pool) => pool.install(op),
            Err(e) => {
                warn!(
                    "Failed to build a {}-thread pool ({}), using the global pool",
                    self.workers, e
                );
                op()
            }
        }
    }
}

fn resolve_workers(workers: usize) -> usize {
    if workers == 0 {
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4)
            .min(16) // Cap at 16 threads
    } else {
        workers
    }
}
