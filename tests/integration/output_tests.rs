//! Output formatting over real lint runs.

use crate::mocks::*;
use cfn_inline_lint::cli::args::OutputFormat;
use cfn_inline_lint::cli::output::{get_formatter, ALL_PASSED, SOME_FAILED};
use cfn_inline_lint::{lint_files, LintConfig, RunReport};

fn run(templates: &[(&str, &str)], checker: &FakeChecker) -> RunReport {
    let fixtures = Fixtures::new();
    let paths: Vec<_> = templates
        .iter()
        .map(|(name, contents)| fixtures.write(name, contents))
        .collect();
    lint_files(&paths, &LintConfig::default(), checker)
}

#[test]
fn test_text_output_for_passing_run() {
    let report = run(&[("valid.yaml", VALID_TEMPLATE)], &FakeChecker::clean());
    let output = get_formatter(OutputFormat::Text, true, false, false).format(&report);
    assert_eq!(output.trim_end(), ALL_PASSED);
}

#[test]
fn test_text_output_verbose_lists_resources() {
    let report = run(&[("valid.yaml", VALID_TEMPLATE)], &FakeChecker::clean());
    let output = get_formatter(OutputFormat::Text, true, true, false).format(&report);
    assert!(output.contains("Resource LambdaFunction has no errors"));
    assert!(output.trim_end().ends_with(ALL_PASSED));
}

#[test]
fn test_text_output_for_failing_run() {
    let checker = FakeChecker::always(1, "stdin:1:23: E999 SyntaxError: '(' was never closed\n");
    let report = run(&[("invalid.yaml", INVALID_TEMPLATE)], &checker);
    let output = get_formatter(OutputFormat::Text, true, false, false).format(&report);

    assert!(output.starts_with(SOME_FAILED));
    assert!(output.contains("invalid.yaml"));
    assert!(output.contains("\t1. stdin:1:23: E999 SyntaxError: '(' was never closed"));
}

#[test]
fn test_json_output_for_mixed_run() {
    let report = run(
        &[("mixed.yaml", MIXED_TEMPLATE), ("s3.yaml", S3_CODE_TEMPLATE)],
        &FakeChecker::clean(),
    );
    let output = get_formatter(OutputFormat::Json, true, false, false).format(&report);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["passed"], true);
    assert_eq!(value["summary"]["no_issues"], 2);
    assert_eq!(value["summary"]["unsupported"], 1);
    assert_eq!(value["summary"]["skipped"], 1);
    assert_eq!(value["files"][0]["resources"][1]["status"], "language_unsupported");
    assert_eq!(value["files"][1]["resources"][0]["reason"], "no inline code");
}

#[test]
fn test_junit_output_reports_errors() {
    let fixtures = Fixtures::new();
    let missing = fixtures.path().join("missing.yaml");
    let report = lint_files(&[missing], &LintConfig::default(), &FakeChecker::clean());
    let output = get_formatter(OutputFormat::Junit, true, false, false).format(&report);

    assert!(output.contains("errors=\"1\""));
    assert!(output.contains("<error message=\"could not read"));
}
