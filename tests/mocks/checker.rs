//! Scripted checker.
//!
//! Returns queued outputs in order, then a default output, and records every
//! invocation.

use cfn_inline_lint::checker::{Checker, CheckerOutput, Language};
use cfn_inline_lint::LintResult;
use std::cell::RefCell;
use std::collections::VecDeque;

/// One recorded checker invocation
#[derive(Debug, Clone, PartialEq)]
pub struct CheckerCall {
    pub language: Language,
    pub source: String,
    pub extra_args: Vec<String>,
}

/// Checker returning scripted outputs
#[derive(Debug, Default)]
pub struct FakeChecker {
    queued: RefCell<VecDeque<CheckerOutput>>,
    fallback: CheckerOutput,
    calls: RefCell<Vec<CheckerCall>>,
}

impl FakeChecker {
    /// Checker that reports every snippet as clean
    pub fn clean() -> Self {
        FakeChecker {
            fallback: output(0, ""),
            ..Default::default()
        }
    }

    /// Checker that reports the same diagnostics for every snippet
    pub fn always(status: i32, stdout: &str) -> Self {
        FakeChecker {
            fallback: output(status, stdout),
            ..Default::default()
        }
    }

    /// Queue an output for the next unanswered call
    pub fn then(self, status: i32, stdout: &str) -> Self {
        self.queued.borrow_mut().push_back(output(status, stdout));
        self
    }

    pub fn calls(&self) -> Vec<CheckerCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Checker for FakeChecker {
    fn check(&self, language: Language, source: &str, extra_args: &[String]) -> LintResult<CheckerOutput> {
        self.calls.borrow_mut().push(CheckerCall {
            language,
            source: source.to_string(),
            extra_args: extra_args.to_vec(),
        });

        Ok(self
            .queued
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone()))
    }
}

/// Build a checker output with empty stderr
pub fn output(status: i32, stdout: &str) -> CheckerOutput {
    CheckerOutput {
        status: Some(status),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}
