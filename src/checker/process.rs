//! Subprocess checker.
//!
//! Runs `<python> -m flake8 -` with the inline code on stdin. One process is
//! spawned per call; nothing is reused between resources.

use super::{Checker, CheckerOutput, Language, DEFAULT_PYTHON};
use crate::{LintError, LintResult};
use std::io::{ErrorKind, Write};
use std::process::{Child, Command, Stdio};

/// Checker backed by an external linter process.
#[derive(Debug, Clone)]
pub struct ProcessChecker {
    python: String,
}

impl ProcessChecker {
    /// Create a checker that runs flake8 through the given interpreter.
    pub fn new(python: impl Into<String>) -> Self {
        ProcessChecker {
            python: python.into(),
        }
    }

    /// Program and base arguments for a language.
    pub fn command_line(&self, language: Language) -> (String, Vec<String>) {
        match language {
            Language::Python => (
                self.python.clone(),
                vec!["-m".to_string(), "flake8".to_string(), "-".to_string()],
            ),
        }
    }
}

impl Default for ProcessChecker {
    fn default() -> Self {
        Self::new(DEFAULT_PYTHON)
    }
}

impl Checker for ProcessChecker {
    fn check(&self, language: Language, source: &str, extra_args: &[String]) -> LintResult<CheckerOutput> {
        let (program, mut args) = self.command_line(language);
        args.extend(extra_args.iter().cloned());

        tracing::debug!(program = %program, args = ?args, "spawning checker");

        let command_error = |source: std::io::Error| LintError::Command {
            program: program.clone(),
            source,
        };

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(command_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            // A checker that exits early closes its end; its exit status
            // says what happened.
            match stdin.write_all(source.as_bytes()) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                Err(e) => {
                    drop(stdin);
                    reap(&mut child);
                    return Err(command_error(e));
                }
            }
        }

        let output = child.wait_with_output().map_err(command_error)?;

        tracing::debug!(program = %program, status = ?output.status.code(), "checker finished");

        Ok(CheckerOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Kill and wait for a child that will not be read from.
fn reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        tracing::debug!(error = %e, "checker already exited");
    }
    if let Err(e) = child.wait() {
        tracing::warn!(error = %e, "failed to wait for checker");
    }
}
