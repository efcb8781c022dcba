//! Command line arguments for cill.

use crate::checker::{validate_extra_args, DEFAULT_PYTHON};
use crate::version;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
    /// JUnit XML for CI/CD integration
    Junit,
}

/// Validated extra arguments for the checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraArgs(pub Vec<String>);

fn parse_extra_args(raw: &str) -> Result<ExtraArgs, String> {
    validate_extra_args(raw).map(ExtraArgs).map_err(|e| e.to_string())
}

/// Parsed command line arguments
#[derive(Debug, Clone, Parser)]
#[command(name = "cill")]
#[command(about = "Lint inline Lambda code in CloudFormation templates")]
#[command(version, long_version = version::long_version())]
pub struct Args {
    /// CloudFormation template files to lint
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Extra flake8 arguments, separated by single whitespace characters
    #[arg(
        short = 'a',
        long = "args",
        value_name = "ARGS",
        allow_hyphen_values = true,
        value_parser = parse_extra_args
    )]
    pub extra_args: Option<ExtraArgs>,

    /// Python interpreter used to run flake8
    #[arg(long, env = "CILL_PYTHON", default_value = DEFAULT_PYTHON)]
    pub python: String,

    /// Output format
    #[arg(long, env = "CILL_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Only output failures
    #[arg(short, long)]
    pub quiet: bool,

    /// Show every resource and more log output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Stop after the first file that does not pass
    #[arg(long)]
    pub fail_fast: bool,
}
