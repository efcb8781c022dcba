//! cill CLI entry point
//!
//! Lints inline Lambda function code in CloudFormation templates.

use cfn_inline_lint::cli::args::Args;
use cfn_inline_lint::cli::output::get_formatter;
use cfn_inline_lint::logging::init_tracing;
use cfn_inline_lint::{run_lint, LintConfig};

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    init_tracing(args.verbose, args.quiet);

    let no_color = args.no_color || std::env::var_os("NO_COLOR").is_some();
    if no_color {
        colored::control::set_override(false);
    }

    let config = LintConfig::from_args(&args);
    let report = run_lint(&config);

    let formatter = get_formatter(args.format, no_color, args.verbose > 0, args.quiet);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = formatter.render(&report, &mut out).and_then(|_| out.flush()) {
        tracing::error!(error = %e, "failed to write report");
        return ExitCode::from(1);
    }

    if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
