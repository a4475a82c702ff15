//! rdftest conformance harness.
//!
//! Turns graph-encoded test manifests (W3C `mf:` vocabulary, SHACL test
//! suite layout) into a tree of runnable cases, validates each case with a
//! SHACL engine and compares the engine's conformance with the expected one.
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Find manifest files by name | [`discovery`] |
//! | Expand includes and collect cases | [`manifest`], [`case`] |
//! | Read `rpt:` options off each case | [`params`] |
//! | Parse the action's graphs, call the engine once | [`dispatch`] |
//! | Judge the outcome, render a diagnostic on mismatch | [`compare`] |
//! | Drive the above and aggregate results | [`runner`], [`report`] |
//!
//! # Entry Point
//!
//! ```no_run
//! use rdftest_conformance::{run, HarnessConfig};
//! use std::path::PathBuf;
//!
//! let config = HarnessConfig::load(None).expect("Failed to load config");
//! let report = run(&[PathBuf::from("tests")], config).expect("Failed to run suite");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod case;
pub mod compare;
pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod graph;
pub mod manifest;
pub mod params;
pub mod report;
pub mod runner;

pub use case::{Action, ExpectedResult, TestCase};
pub use compare::{Diagnostic, Verdict};
pub use config::HarnessConfig;
pub use dispatch::{EngineOutput, ValidationEngine, ValidationOutcome, ValidationRequest};
pub use engine::CommandEngine;
pub use error::{CaseError, ConfigError, EngineError, GraphError, ManifestError, NavError, ParamError};
pub use manifest::{ManifestItem, ManifestTree};
pub use params::{OptionMap, OptionValue};
pub use report::{CaseResult, Severity, SuiteReport};
pub use runner::Runner;

use std::path::PathBuf;

/// Runs every manifest under `paths` with the configured external validator.
///
/// # Errors
///
/// Returns an error only if a directory cannot be walked.
pub fn run(paths: &[PathBuf], config: HarnessConfig) -> anyhow::Result<SuiteReport> {
    let engine = CommandEngine::from_config(&config.engine);
    Runner::new(engine, config).run_paths(paths)
}
