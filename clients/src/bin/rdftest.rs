//! `rdftest`: runs graph-encoded SHACL test manifests against a validator.
//!
//! Discovers every manifest under the given paths (files named `test*` with a
//! Turtle or JSON-LD extension), resolves includes, validates each case and
//! compares the reported conformance with the expected one.
//!
//! **Usage:**
//! ```
//! rdftest [PATHS...] [--config <file>] [--engine <program>]
//!         [--diagnostic-format turtle|ntriples] [--json] [--verbose]
//! rdftest --list-params
//! ```
//!
//! Exits non-zero if any case fails or the validator errors.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use rdftest_conformance::graph::SerializationFormat;
use rdftest_conformance::{run, HarnessConfig, Severity};
use rdftest_vocab::{iris, params::PARAMETERS};
use tracing_subscriber::EnvFilter;

/// Run rdftest manifests.
#[derive(Parser)]
#[command(
    name = "rdftest",
    about = "Run graph-encoded SHACL test manifests against a validation engine"
)]
struct Args {
    /// Manifest files or directories to scan (default: current directory).
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Config file (default: rdftest.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Validator executable, overriding the config.
    #[arg(long)]
    engine: Option<String>,

    /// Syntax of the report graphs in failure details.
    #[arg(long)]
    diagnostic_format: Option<SerializationFormat>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,

    /// Print the engine parameters a test case may set, then exit.
    #[arg(long)]
    list_params: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_params {
        println!("Engine parameters (predicates in <{}>):", iris::RPT);
        for def in PARAMETERS {
            println!("  {def}");
        }
        return Ok(());
    }

    let level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let mut config =
        HarnessConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(program) = args.engine {
        config.engine.program = program;
    }
    if let Some(format) = args.diagnostic_format {
        config.diagnostics.format = format;
    }

    let report = run(&args.paths, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("rdftest Report");
        println!("==============");
        println!();

        for result in &report.results {
            let status = match result.severity {
                Severity::Pass => "PASS",
                Severity::Warning => "WARN",
                Severity::Failure => "FAIL",
                Severity::Error => "ERROR",
            };
            println!("[{}] {} - {}", status, result.test, result.message);
            for detail in &result.details {
                println!("       {}", detail);
            }
        }

        println!();
        println!(
            "Summary: {} passed, {} warnings, {} failed, {} errors",
            report.pass_count(),
            report.warning_count(),
            report.failure_count(),
            report.error_count()
        );
    }

    if !report.all_passed() {
        eprintln!(
            "rdftest FAILED: {} case(s) failed, {} engine error(s).",
            report.failure_count(),
            report.error_count()
        );
        process::exit(1);
    }

    if !args.json {
        println!("All cases PASSED.");
    }
    Ok(())
}
