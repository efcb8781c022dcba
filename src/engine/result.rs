//! Result aggregation and reporting.
//!
//! Collects per-file outcomes of a run and computes summaries and verdicts.

use crate::{CheckResult, ResourceCheck};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of linting one template file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The template has no `Resources` section
    NoResources,
    /// Every function resource was scanned and validated
    Checked { resources: Vec<ResourceCheck> },
    /// Processing stopped with a fatal error
    Errored { message: String },
}

impl FileOutcome {
    /// Checked resources, empty unless the outcome is `Checked`.
    pub fn resources(&self) -> &[ResourceCheck] {
        match self {
            FileOutcome::Checked { resources } => resources.as_slice(),
            _ => &[],
        }
    }
}

/// Report for one template file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileReport {
    /// Whether the file passed: no fatal error and no resource with issues.
    pub fn passed(&self) -> bool {
        match &self.outcome {
            FileOutcome::NoResources => true,
            FileOutcome::Checked { resources } => verdict(resources),
            FileOutcome::Errored { .. } => false,
        }
    }

    pub fn is_errored(&self) -> bool {
        matches!(self.outcome, FileOutcome::Errored { .. })
    }
}

/// Report for a whole run, files in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
}

impl RunReport {
    /// Whether every file passed. A run over zero files passes.
    pub fn passed(&self) -> bool {
        self.files.iter().all(FileReport::passed)
    }

    /// Calculate summary statistics
    pub fn summary(&self) -> ResultSummary {
        let mut summary = ResultSummary::default();

        for file in &self.files {
            if file.is_errored() {
                summary.files_errored += 1;
            } else if file.passed() {
                summary.files_passed += 1;
            } else {
                summary.files_failed += 1;
            }

            for check in file.outcome.resources() {
                summary.resources_total += 1;

                match &check.result {
                    CheckResult::NoIssues => summary.no_issues += 1,
                    CheckResult::IssuesFound { .. } => summary.issues_found += 1,
                    CheckResult::Skipped { .. } => summary.skipped += 1,
                    CheckResult::LanguageUnsupported { .. } => summary.unsupported += 1,
                    CheckResult::NotYetChecked => {}
                }
            }
        }

        summary
    }
}

/// Result summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub files_passed: u32,
    pub files_failed: u32,
    pub files_errored: u32,
    pub resources_total: u32,
    pub no_issues: u32,
    pub issues_found: u32,
    pub skipped: u32,
    pub unsupported: u32,
}

impl ResultSummary {
    pub fn files_total(&self) -> u32 {
        self.files_passed + self.files_failed + self.files_errored
    }
}

/// Overall verdict for a list of checked resources.
///
/// True unless some resource has `IssuesFound`. An empty list passes.
pub fn verdict(resources: &[ResourceCheck]) -> bool {
    resources.iter().all(|check| check.result.is_passing())
}
