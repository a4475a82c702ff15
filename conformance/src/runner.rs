//! Suite runner: discovery, resolution and per-case execution.
//!
//! Cases run one after another. Every error stays attached to the case or
//! include that raised it and is recorded in the report; the run continues
//! with the next item.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::case::TestCase;
use crate::compare::{compare, Verdict};
use crate::config::HarnessConfig;
use crate::dispatch::{dispatch, ValidationEngine};
use crate::discovery::discover;
use crate::error::CaseError;
use crate::manifest::{self, ManifestItem, ManifestTree};
use crate::report::{CaseResult, SuiteReport};

/// Runs manifests against one validation engine.
pub struct Runner<E> {
    engine: E,
    config: HarnessConfig,
}

impl<E: ValidationEngine> Runner<E> {
    /// Creates a runner.
    pub fn new(engine: E, config: HarnessConfig) -> Self {
        Self { engine, config }
    }

    /// The engine cases are dispatched to.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Discovers the manifests under each path and runs them all.
    ///
    /// # Errors
    ///
    /// Returns an error only if a directory cannot be walked. Manifest,
    /// case and engine errors are recorded in the report.
    pub fn run_paths(&self, paths: &[PathBuf]) -> anyhow::Result<SuiteReport> {
        let mut report = SuiteReport::new();
        for root in paths {
            let manifests = discover(root, &self.config.discovery)
                .with_context(|| format!("Failed to scan {}", root.display()))?;
            if manifests.is_empty() {
                warn!(path = %root.display(), "No manifests found");
            }
            for path in manifests {
                report.extend(self.run_manifest(&path));
            }
        }
        info!(
            passed = report.pass_count(),
            failed = report.failure_count(),
            errors = report.error_count(),
            "Run complete"
        );
        Ok(report)
    }

    /// Resolves one manifest and runs every case it collects.
    pub fn run_manifest(&self, path: &Path) -> SuiteReport {
        match manifest::resolve(path) {
            Ok(tree) => self.run_tree(&tree),
            Err(e) => {
                let mut report = SuiteReport::new();
                report.push(CaseResult::fail(
                    path.display().to_string(),
                    format!("Failed to collect manifest: {e}"),
                ));
                report
            }
        }
    }

    /// Runs a resolved tree, depth first.
    pub fn run_tree(&self, tree: &ManifestTree) -> SuiteReport {
        let mut report = SuiteReport::new();
        for item in &tree.items {
            match item {
                ManifestItem::SubManifest(sub) => report.extend(self.run_tree(sub)),
                ManifestItem::Case(case) => report.push(self.run_case(case)),
                ManifestItem::Revisited(path) => report.push(CaseResult::warn(
                    path.display().to_string(),
                    format!(
                        "Manifest already included, skipped under {}",
                        tree.path.display()
                    ),
                )),
                ManifestItem::Error(err) => report.push(CaseResult::fail(
                    err.origin.clone(),
                    format!("Collection error: {}", err.error),
                )),
            }
        }
        report
    }

    /// Runs one case and maps its verdict or error to a result.
    pub fn run_case(&self, case: &TestCase) -> CaseResult {
        match self.execute(case) {
            Ok(Verdict::Pass) => CaseResult::pass(&case.id, &case.name),
            Ok(Verdict::Fail(diagnostic)) => CaseResult::fail_with_details(
                &case.id,
                format!(
                    "{}: expected conforms {}, engine reported {}",
                    case.name, diagnostic.expected_conforms, diagnostic.actual_conforms
                ),
                diagnostic.to_string().lines().map(String::from).collect(),
            ),
            Err(e) if e.is_internal() => {
                CaseResult::error(&case.id, format!("{}: internal error: {e}", case.name))
            }
            Err(e) => CaseResult::fail(&case.id, format!("{}: {e}", case.name)),
        }
    }

    /// Extracts options, dispatches and compares.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid, a graph cannot be loaded
    /// or rendered, or the engine fails.
    pub fn execute(&self, case: &TestCase) -> Result<Verdict, CaseError> {
        let options = case.extract_options()?;
        let outcome = dispatch(&self.engine, &case.action, options)?;
        let verdict = compare(&outcome, case, self.config.diagnostics.format)?;
        debug!(case = %case.id, pass = verdict.is_pass(), "Case finished");
        Ok(verdict)
    }
}
