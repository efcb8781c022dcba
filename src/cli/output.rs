//! Output formatting for cill.
//!
//! Provides terminal, JSON, and JUnit XML output formatters.
//!
//! # Graceful Degradation
//!
//! - Non-TTY output: color disabled via NO_COLOR or --no-color
//! - Empty reports: produce valid output with zero files
//! - Errored files: reported in place, never hide other files' results
//!
//! Formatters only fail when the sink does.

use crate::cli::args::OutputFormat;
use crate::engine::result::{FileOutcome, FileReport, ResultSummary, RunReport};
use crate::CheckResult;
use colored::{Color, Colorize};
use serde::Serialize;
use std::io::{self, Write};

/// Line printed when every file passes.
pub const ALL_PASSED: &str = "✅ All files passed linting!";
/// Line printed before the details of a failing run.
pub const SOME_FAILED: &str = "❌ Some files failed linting. See details below:";

/// Trait for output formatters
pub trait OutputFormatter {
    /// Write a run report to `out`.
    fn render(&self, report: &RunReport, out: &mut dyn Write) -> io::Result<()>;

    /// Format a run report into a string
    fn format(&self, report: &RunReport) -> String {
        let mut buffer = Vec::new();
        if let Err(e) = self.render(report, &mut buffer) {
            tracing::warn!(error = %e, "failed to format report");
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

/// Terminal (human-readable) formatter
pub struct TerminalFormatter {
    color: bool,
    verbose: bool,
    quiet: bool,
}

impl TerminalFormatter {
    pub fn new(color: bool, verbose: bool, quiet: bool) -> Self {
        TerminalFormatter {
            color,
            verbose,
            quiet,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.colorize(text, Color::Green)
    }

    fn yellow(&self, text: &str) -> String {
        self.colorize(text, Color::Yellow)
    }

    fn red(&self, text: &str) -> String {
        self.colorize(text, Color::Red)
    }

    fn gray(&self, text: &str) -> String {
        self.colorize(text, Color::BrightBlack)
    }

    fn render_file(&self, file: &FileReport, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "📝 Processing file: {}", file.path.display())?;

        match &file.outcome {
            FileOutcome::NoResources => {
                writeln!(out, "{}", self.gray("No Resources section found."))?;
            }
            FileOutcome::Errored { message } => {
                writeln!(out, "{}", self.red(&format!("❌ Error: {}", message)))?;
            }
            FileOutcome::Checked { resources } if resources.is_empty() => {
                writeln!(out, "{}", self.gray("No Lambda functions found."))?;
            }
            FileOutcome::Checked { resources } => {
                for (index, check) in resources.iter().enumerate() {
                    let n = index + 1;
                    match &check.result {
                        CheckResult::IssuesFound { diagnostics } => {
                            writeln!(
                                out,
                                "{}",
                                self.red(&format!(
                                    "❌ {}. Resource {} has the following errors in the lambda function:",
                                    n, check.id
                                ))
                            )?;
                            for (line, diagnostic) in diagnostics.iter().enumerate() {
                                writeln!(out, "\t{}. {}", line + 1, diagnostic)?;
                            }
                        }
                        _ if self.quiet => {}
                        CheckResult::NoIssues => {
                            writeln!(
                                out,
                                "{}",
                                self.green(&format!(
                                    "✅ {}. Resource {} has no errors in the lambda function. 🎉",
                                    n, check.id
                                ))
                            )?;
                        }
                        CheckResult::Skipped { reason } => {
                            writeln!(
                                out,
                                "{}",
                                self.gray(&format!("⏭  {}. Resource {} skipped: {}", n, check.id, reason))
                            )?;
                        }
                        CheckResult::LanguageUnsupported { reason } => {
                            writeln!(
                                out,
                                "{}",
                                self.yellow(&format!("⚠️  {}. Resource {} not checked: {}", n, check.id, reason))
                            )?;
                        }
                        CheckResult::NotYetChecked => {
                            writeln!(out, "{}", self.gray(&format!("{}. Resource {} not checked", n, check.id)))?;
                        }
                    }
                }
            }
        }

        writeln!(out)
    }

    fn render_summary(&self, summary: &ResultSummary, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "SUMMARY: {} file(s): {} passed, {} failed, {} errored",
            summary.files_total(),
            summary.files_passed,
            summary.files_failed,
            summary.files_errored
        )?;
        writeln!(
            out,
            "Resources: {} checked clean, {} with issues, {} skipped, {} unsupported",
            summary.no_issues, summary.issues_found, summary.skipped, summary.unsupported
        )
    }
}

impl OutputFormatter for TerminalFormatter {
    fn render(&self, report: &RunReport, out: &mut dyn Write) -> io::Result<()> {
        let passed = report.passed();

        if passed && !self.verbose {
            return writeln!(out, "{}", self.green(ALL_PASSED));
        }

        if !passed {
            writeln!(out, "{}", self.red(SOME_FAILED))?;
            writeln!(out)?;
        }

        for file in &report.files {
            if self.quiet && file.passed() {
                continue;
            }
            self.render_file(file, out)?;
        }

        if self.verbose {
            self.render_summary(&report.summary(), out)?;
        }

        if passed {
            writeln!(out, "{}", self.green(ALL_PASSED))?;
        }

        Ok(())
    }
}

/// JSON formatter
pub struct JsonFormatter {
    pretty: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    passed: bool,
    summary: ResultSummary,
    files: &'a [FileReport],
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        JsonFormatter { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn render(&self, report: &RunReport, out: &mut dyn Write) -> io::Result<()> {
        let document = JsonReport {
            passed: report.passed(),
            summary: report.summary(),
            files: &report.files,
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &document)?;
        } else {
            serde_json::to_writer(&mut *out, &document)?;
        }
        writeln!(out)
    }
}

/// JUnit XML formatter
pub struct JunitFormatter;

impl JunitFormatter {
    pub fn new() -> Self {
        JunitFormatter
    }

    fn escape_xml(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => result.push_str("&amp;"),
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                '"' => result.push_str("&quot;"),
                '\'' => result.push_str("&apos;"),
                c => result.push(c),
            }
        }
        result
    }

    fn render_suite(&self, file: &FileReport, out: &mut dyn Write) -> io::Result<()> {
        let name = Self::escape_xml(&file.path.display().to_string());

        if let FileOutcome::Errored { message } = &file.outcome {
            writeln!(
                out,
                "  <testsuite name=\"{}\" tests=\"1\" failures=\"0\" errors=\"1\" skipped=\"0\">",
                name
            )?;
            writeln!(out, "    <testcase name=\"{}\" classname=\"cill\">", name)?;
            writeln!(out, "      <error message=\"{}\" />", Self::escape_xml(message))?;
            writeln!(out, "    </testcase>")?;
            return writeln!(out, "  </testsuite>");
        }

        let resources = file.outcome.resources();
        let failures = resources
            .iter()
            .filter(|c| matches!(c.result, CheckResult::IssuesFound { .. }))
            .count();
        let skipped = resources
            .iter()
            .filter(|c| {
                matches!(
                    c.result,
                    CheckResult::Skipped { .. } | CheckResult::LanguageUnsupported { .. }
                )
            })
            .count();

        writeln!(
            out,
            "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"{}\">",
            name,
            resources.len(),
            failures,
            skipped
        )?;

        for check in resources {
            write!(
                out,
                "    <testcase name=\"{}\" classname=\"{}\"",
                Self::escape_xml(&check.id),
                name
            )?;

            match &check.result {
                CheckResult::IssuesFound { diagnostics } => {
                    writeln!(out, ">")?;
                    writeln!(
                        out,
                        "      <failure message=\"{} issue(s)\">{}</failure>",
                        diagnostics.len(),
                        Self::escape_xml(&diagnostics.join("\n"))
                    )?;
                    writeln!(out, "    </testcase>")?;
                }
                CheckResult::Skipped { reason } | CheckResult::LanguageUnsupported { reason } => {
                    writeln!(out, ">")?;
                    writeln!(out, "      <skipped message=\"{}\" />", Self::escape_xml(reason))?;
                    writeln!(out, "    </testcase>")?;
                }
                CheckResult::NoIssues | CheckResult::NotYetChecked => {
                    writeln!(out, " />")?;
                }
            }
        }

        writeln!(out, "  </testsuite>")
    }
}

impl Default for JunitFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JunitFormatter {
    fn render(&self, report: &RunReport, out: &mut dyn Write) -> io::Result<()> {
        let summary = report.summary();
        writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(
            out,
            "<testsuites tests=\"{}\" failures=\"{}\" errors=\"{}\" skipped=\"{}\">",
            summary.resources_total + summary.files_errored,
            summary.issues_found,
            summary.files_errored,
            summary.skipped + summary.unsupported
        )?;

        for file in &report.files {
            self.render_suite(file, out)?;
        }

        writeln!(out, "</testsuites>")
    }
}

/// Get a formatter based on the output format
pub fn get_formatter(
    format: OutputFormat,
    no_color: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TerminalFormatter::new(!no_color, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Junit => Box::new(JunitFormatter::new()),
    }
}
