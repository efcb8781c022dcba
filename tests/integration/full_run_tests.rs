//! Full lint runs through the library with a scripted checker.

use crate::mocks::*;
use cfn_inline_lint::checker::Language;
use cfn_inline_lint::engine::result::FileOutcome;
use cfn_inline_lint::{lint_file, lint_files, CheckResult, LintConfig};

fn config() -> LintConfig {
    LintConfig::default()
}

fn resources(outcome: &FileOutcome) -> Vec<(String, CheckResult)> {
    outcome
        .resources()
        .iter()
        .map(|check| (check.id.clone(), check.result.clone()))
        .collect()
}

#[test]
fn test_valid_template_passes() {
    let fixtures = Fixtures::new();
    let path = fixtures.write("valid.yaml", VALID_TEMPLATE);
    let checker = FakeChecker::clean();

    let report = lint_file(&path, &config(), &checker).unwrap();

    assert!(report.passed());
    assert_eq!(
        resources(&report.outcome),
        vec![("LambdaFunction".to_string(), CheckResult::NoIssues)]
    );
    let calls = checker.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].language, Language::Python);
    assert!(calls[0].source.starts_with("def handler(event, context):\n"));
}

#[test]
fn test_invalid_template_fails_with_diagnostics() {
    let fixtures = Fixtures::new();
    let path = fixtures.write("invalid.yaml", INVALID_TEMPLATE);
    let checker = FakeChecker::always(
        1,
        "stdin:1:7: E999 SyntaxError: '(' was never closed\nstdin:1:23: W292 no newline at end of file\n",
    );

    let report = lint_file(&path, &config(), &checker).unwrap();

    assert!(!report.passed());
    match &report.outcome.resources()[0].result {
        CheckResult::IssuesFound { diagnostics } => {
            assert_eq!(diagnostics.len(), 2);
            assert!(diagnostics[0].contains("E999"));
        }
        other => panic!("expected issues, got {:?}", other),
    }
    assert_eq!(checker.calls()[0].source, "print('Hello, Lambda!'");
}

#[test]
fn test_runtime_from_parameter_default() {
    let fixtures = Fixtures::new();
    let path = fixtures.write("params.yaml", PARAMETER_RUNTIME_TEMPLATE);
    let checker = FakeChecker::clean();

    let report = lint_file(&path, &config(), &checker).unwrap();

    assert!(report.passed());
    assert_eq!(checker.call_count(), 1);
    assert_eq!(report.outcome.resources()[0].language, Some(Language::Python));
}

#[test]
fn test_missing_parameter_is_fatal() {
    let fixtures = Fixtures::new();
    let path = fixtures.write("missing.yaml", MISSING_PARAMETER_TEMPLATE);
    let checker = FakeChecker::clean();

    let result = lint_file(&path, &config(), &checker);

    let message = result.unwrap_err().to_string();
    assert!(message.contains("PythonRuntime"));
    assert_eq!(checker.call_count(), 0);
}

#[test]
fn test_find_in_map_runtime_is_unsupported() {
    let fixtures = Fixtures::new();
    let path = fixtures.write("mapped.yaml", FIND_IN_MAP_RUNTIME_TEMPLATE);
    let checker = FakeChecker::clean();

    let report = lint_file(&path, &config(), &checker).unwrap();

    assert!(report.passed());
    assert_eq!(
        resources(&report.outcome),
        vec![(
            "LambdaFunction".to_string(),
            CheckResult::LanguageUnsupported {
                reason: "runtime '!FindInMap sequence' cannot be resolved".to_string()
            }
        )]
    );
    assert_eq!(checker.call_count(), 0);
}

#[test]
fn test_s3_code_is_skipped() {
    let fixtures = Fixtures::new();
    let path = fixtures.write("s3.yaml", S3_CODE_TEMPLATE);
    let checker = FakeChecker::clean();

    let report = lint_file(&path, &config(), &checker).unwrap();

    assert!(report.passed());
    assert!(matches!(
        report.outcome.resources()[0].result,
        CheckResult::Skipped { .. }
    ));
    assert_eq!(checker.call_count(), 0);
}

#[test]
fn test_no_resources_passes() {
    let fixtures = Fixtures::new();
    let path = fixtures.write("empty.yaml", NO_RESOURCES_TEMPLATE);

    let report = lint_file(&path, &config(), &FakeChecker::clean()).unwrap();

    assert_eq!(report.outcome, FileOutcome::NoResources);
    assert!(report.passed());
}

#[test]
fn test_mixed_template_keeps_document_order() {
    let fixtures = Fixtures::new();
    let path = fixtures.write("mixed.yaml", MIXED_TEMPLATE);
    let checker = FakeChecker::clean().then(1, "stdin:1:1: F401 unused\n");

    let report = lint_file(&path, &config(), &checker).unwrap();

    let ids: Vec<_> = report.outcome.resources().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["First", "NodeFunction", "Second"]);
    assert!(matches!(report.outcome.resources()[0].result, CheckResult::IssuesFound { .. }));
    assert!(matches!(
        report.outcome.resources()[1].result,
        CheckResult::LanguageUnsupported { .. }
    ));
    assert_eq!(report.outcome.resources()[2].result, CheckResult::NoIssues);

    let sources: Vec<_> = checker.calls().into_iter().map(|c| c.source).collect();
    assert_eq!(sources, vec!["a = 1\n", "b = 2\n"]);
}

#[test]
fn test_linting_twice_gives_same_result() {
    let fixtures = Fixtures::new();
    let path = fixtures.write("mixed.yaml", MIXED_TEMPLATE);
    let checker = FakeChecker::always(1, "stdin:1:1: E1 x\n");

    let first = lint_file(&path, &config(), &checker).unwrap();
    let second = lint_file(&path, &config(), &checker).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_errored_file_does_not_stop_the_run() {
    let fixtures = Fixtures::new();
    let missing = fixtures.path().join("missing.yaml");
    let valid = fixtures.write("valid.yaml", VALID_TEMPLATE);

    let report = lint_files(&[missing, valid], &config(), &FakeChecker::clean());

    assert_eq!(report.files.len(), 2);
    assert!(matches!(report.files[0].outcome, FileOutcome::Errored { .. }));
    assert!(report.files[1].passed());
    assert!(!report.passed());
    assert_eq!(report.summary().files_errored, 1);
}

#[test]
fn test_fail_fast_stops_after_first_failure() {
    let fixtures = Fixtures::new();
    let invalid = fixtures.write("invalid.yaml", INVALID_TEMPLATE);
    let valid = fixtures.write("valid.yaml", VALID_TEMPLATE);
    let config = LintConfig {
        fail_fast: true,
        ..LintConfig::default()
    };
    let checker = FakeChecker::always(1, "stdin:1:7: E999 SyntaxError\n");

    let report = lint_files(&[invalid, valid], &config, &checker);

    assert_eq!(report.files.len(), 1);
    assert_eq!(checker.call_count(), 1);
}

#[test]
fn test_extra_args_reach_the_checker() {
    let fixtures = Fixtures::new();
    let path = fixtures.write("valid.yaml", VALID_TEMPLATE);
    let config = LintConfig::default()
        .with_extra_args("--max-line-length=120 --ignore=E501")
        .unwrap();
    let checker = FakeChecker::clean();

    lint_file(&path, &config, &checker).unwrap();

    assert_eq!(
        checker.calls()[0].extra_args,
        vec!["--max-line-length=120", "--ignore=E501"]
    );
}

#[test]
fn test_checker_crash_is_recorded_as_error() {
    let fixtures = Fixtures::new();
    let path = fixtures.write("valid.yaml", VALID_TEMPLATE);

    let report = lint_files(&[path], &config(), &FakeChecker::always(2, ""));

    match &report.files[0].outcome {
        FileOutcome::Errored { message } => assert!(message.contains("exit code 2")),
        other => panic!("expected errored outcome, got {:?}", other),
    }
}
