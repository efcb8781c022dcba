//! cfn-inline-lint library
//!
//! Lints inline Lambda function code embedded in CloudFormation templates.
//!
//! This library provides:
//! - A YAML template loader that keeps scalars as text
//! - Discovery of `AWS::Lambda::Function` resources carrying inline `ZipFile` code
//! - Runtime resolution, including `!Ref` lookups into the `Parameters` section
//! - Dispatch of the inline code to an external checker (flake8 for Python)
//! - Text, JSON and JUnit XML reports
//!
//! # Example
//!
//! ```no_run
//! use cfn_inline_lint::{run_lint, LintConfig};
//!
//! let config = LintConfig {
//!     files: vec!["template.yaml".into()],
//!     ..Default::default()
//! };
//! let report = run_lint(&config);
//! println!("All files passed: {}", report.passed());
//! ```

pub mod checker;
pub mod cli;
pub mod engine;
pub mod logging;
pub mod template;
pub mod version;

use checker::{Checker, Language, ProcessChecker};
use cli::args::Args;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Re-exports for public API
pub use engine::result::{FileOutcome, FileReport, ResultSummary, RunReport};
pub use template::{Node, Template};

/// Outcome of checking a single function resource.
///
/// Every entry starts as `NotYetChecked` when the scanner finds it and moves
/// to exactly one of the other states during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckResult {
    /// Found by the scanner, not validated yet
    NotYetChecked,
    /// The checker reported nothing
    NoIssues,
    /// The checker reported diagnostics, one per line
    IssuesFound { diagnostics: Vec<String> },
    /// No inline code to check
    Skipped { reason: String },
    /// The runtime does not name a language we can check
    LanguageUnsupported { reason: String },
}

impl CheckResult {
    /// Whether this outcome counts towards a passing verdict.
    pub fn is_passing(&self) -> bool {
        !matches!(self, CheckResult::IssuesFound { .. })
    }

    /// Short machine-friendly label.
    pub fn label(&self) -> &'static str {
        match self {
            CheckResult::NotYetChecked => "not_yet_checked",
            CheckResult::NoIssues => "no_issues",
            CheckResult::IssuesFound { .. } => "issues_found",
            CheckResult::Skipped { .. } => "skipped",
            CheckResult::LanguageUnsupported { .. } => "language_unsupported",
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckResult::NotYetChecked => write!(f, "NOT CHECKED"),
            CheckResult::NoIssues => write!(f, "PASS"),
            CheckResult::IssuesFound { diagnostics } => {
                write!(f, "FAIL: {} issue(s)", diagnostics.len())
            }
            CheckResult::Skipped { reason } => write!(f, "SKIP: {}", reason),
            CheckResult::LanguageUnsupported { reason } => write!(f, "UNSUPPORTED: {}", reason),
        }
    }
}

/// A function resource together with its check outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceCheck {
    /// Logical id of the resource in the template
    pub id: String,
    /// Language the inline code was checked as, once resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Outcome of the check
    #[serde(flatten)]
    pub result: CheckResult,
}

impl ResourceCheck {
    /// Create an entry in the `NotYetChecked` state.
    pub fn new(id: impl Into<String>) -> Self {
        ResourceCheck {
            id: id.into(),
            language: None,
            result: CheckResult::NotYetChecked,
        }
    }

    /// Record the terminal outcome for this resource.
    pub fn complete(&mut self, result: CheckResult) {
        debug_assert!(
            self.result == CheckResult::NotYetChecked,
            "resource {} checked twice",
            self.id
        );
        self.result = result;
    }
}

/// Error types for cfn-inline-lint operations.
///
/// All of these are fatal to the file being processed.
#[derive(Debug, Error)]
pub enum LintError {
    /// Template could not be read
    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template is not valid YAML
    #[error("could not parse '{origin}': {message}")]
    Parse { origin: String, message: String },

    /// A required node is missing
    #[error("'{path}' not found")]
    NotFound { path: String },

    /// A node has the wrong shape
    #[error("expected {expected} at '{path}', found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A `!Ref` runtime names a parameter that does not exist
    #[error("resource '{resource}' references parameter '{parameter}' which is not declared in Parameters")]
    MissingParameter { resource: String, parameter: String },

    /// The checker exited with a status other than 0 or 1
    #[error("checker failed for resource '{resource}' ({status}): {stderr}")]
    ProcessFailure {
        resource: String,
        status: String,
        stderr: String,
    },

    /// The checker process could not be run
    #[error("could not run '{program}': {source}")]
    Command {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The extra checker arguments are malformed
    #[error("invalid checker arguments: {0}")]
    InvalidArguments(String),
}

pub type LintResult<T> = Result<T, LintError>;

/// Configuration for a lint run.
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Template files to lint, in order
    pub files: Vec<PathBuf>,
    /// Extra arguments appended to the checker command line
    pub extra_args: Vec<String>,
    /// Python interpreter used to run flake8
    pub python: String,
    /// Stop after the first file that does not pass
    pub fail_fast: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        LintConfig {
            files: Vec::new(),
            extra_args: Vec::new(),
            python: checker::DEFAULT_PYTHON.to_string(),
            fail_fast: false,
        }
    }
}

impl LintConfig {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Self {
        LintConfig {
            files: args.files.clone(),
            extra_args: args
                .extra_args
                .as_ref()
                .map(|extra| extra.0.clone())
                .unwrap_or_default(),
            python: args.python.clone(),
            fail_fast: args.fail_fast,
        }
    }

    /// Set the extra checker arguments from a string of arguments separated by
    /// single whitespace characters.
    pub fn with_extra_args(mut self, raw: &str) -> LintResult<Self> {
        self.extra_args = checker::validate_extra_args(raw)?;
        Ok(self)
    }
}

/// Lint every configured file with the flake8 process checker.
///
/// This is the main entry point used by the `cill` binary.
pub fn run_lint(config: &LintConfig) -> RunReport {
    let checker = ProcessChecker::new(config.python.clone());
    lint_files(&config.files, config, &checker)
}

/// Lint a list of files with the given checker.
///
/// Each file is processed independently: a fatal error in one file is
/// recorded in its report and the remaining files are still linted, unless
/// `fail_fast` is set.
pub fn lint_files(paths: &[PathBuf], config: &LintConfig, checker: &dyn Checker) -> RunReport {
    let mut report = RunReport::default();

    for path in paths {
        let file_report = match lint_file(path, config, checker) {
            Ok(file_report) => file_report,
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "linting aborted");
                FileReport {
                    path: path.clone(),
                    outcome: FileOutcome::Errored {
                        message: e.to_string(),
                    },
                }
            }
        };

        let passed = file_report.passed();
        report.files.push(file_report);

        if config.fail_fast && !passed {
            tracing::info!("stopping after first failing file");
            break;
        }
    }

    report
}

/// Lint a single template file.
pub fn lint_file(path: &Path, config: &LintConfig, checker: &dyn Checker) -> LintResult<FileReport> {
    let template = template::load_template(path)?;
    let outcome = engine::validator::lint_template(&template, checker, &config.extra_args)?;

    Ok(FileReport {
        path: path.to_path_buf(),
        outcome,
    })
}
