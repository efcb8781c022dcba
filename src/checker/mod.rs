//! External code checkers.
//!
//! A [`Checker`] takes source text and returns the raw exit status and
//! output of a linter. [`interpret_output`] turns that into a
//! [`CheckResult`]:
//! - exit 0 or 1: the run succeeded; empty stdout is `NoIssues`, anything else
//!   (even a lone newline) is `IssuesFound` with one diagnostic per line
//! - any other exit, or death by signal: `LintError::ProcessFailure`

pub mod process;

pub use process::ProcessChecker;

use crate::{CheckResult, LintError, LintResult};
use serde::Serialize;
use std::fmt;

/// Interpreter used to run flake8 when none is configured.
pub const DEFAULT_PYTHON: &str = "python";

/// Languages with a checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
}

impl Language {
    /// All supported languages, in detection order.
    pub const ALL: &'static [Language] = &[Language::Python];

    /// Substring that identifies the language inside a runtime string.
    pub fn runtime_marker(self) -> &'static str {
        match self {
            Language::Python => "python",
        }
    }

    /// Detect the language named by a runtime string such as `python3.12`.
    pub fn detect(runtime: &str) -> Option<Language> {
        Language::ALL
            .iter()
            .copied()
            .find(|language| runtime.contains(language.runtime_marker()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Python => write!(f, "Python"),
        }
    }
}

/// Raw result of one checker invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckerOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a linter over a piece of source code.
pub trait Checker {
    /// Check `source` as `language`, appending `extra_args` to the checker's
    /// own arguments.
    fn check(&self, language: Language, source: &str, extra_args: &[String]) -> LintResult<CheckerOutput>;
}

/// Map a checker invocation onto a resource outcome.
pub fn interpret_output(resource: &str, output: &CheckerOutput) -> LintResult<CheckResult> {
    match output.status {
        Some(0) | Some(1) => {
            let diagnostics = split_diagnostics(&output.stdout);
            if diagnostics.is_empty() {
                Ok(CheckResult::NoIssues)
            } else {
                Ok(CheckResult::IssuesFound { diagnostics })
            }
        }
        status => Err(LintError::ProcessFailure {
            resource: resource.to_string(),
            status: match status {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            },
            stderr: output.stderr.trim().to_string(),
        }),
    }
}

/// Split checker stdout into diagnostic lines.
///
/// Lines end at `\n` with an optional `\r` before it. Blank lines inside the
/// output are kept; only the empty piece after a final newline is dropped.
pub fn split_diagnostics(stdout: &str) -> Vec<String> {
    let mut lines: Vec<String> = stdout
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Validate and split the extra checker arguments.
///
/// The string must not start or end with whitespace and arguments must be
/// separated by exactly one whitespace character. An empty string means no
/// extra arguments.
pub fn validate_extra_args(raw: &str) -> LintResult<Vec<String>> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    if raw != raw.trim() {
        return Err(LintError::InvalidArguments(
            "arguments must not have leading or trailing whitespace".to_string(),
        ));
    }

    let mut previous_was_space = false;
    for c in raw.chars() {
        let is_space = c.is_whitespace();
        if is_space && previous_was_space {
            return Err(LintError::InvalidArguments(
                "arguments must be separated by a single whitespace character".to_string(),
            ));
        }
        previous_was_space = is_space;
    }

    Ok(raw.split_whitespace().map(str::to_string).collect())
}
