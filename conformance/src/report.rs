//! Suite report types: per-case results, severity levels, and aggregation.

use serde::Serialize;

/// Severity level of a case result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The case passed.
    Pass,
    /// Something was skipped (non-blocking).
    Warning,
    /// The case failed or could not be collected.
    Failure,
    /// The validation engine failed; distinct from a test failure.
    Error,
}

/// Result of one test case, include or manifest.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    /// Case identifier, or manifest path.
    pub test: String,
    /// Human-readable message describing the outcome.
    pub message: String,
    /// Severity of the result.
    pub severity: Severity,
    /// Optional additional detail lines.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl CaseResult {
    fn new(test: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            test: test.into(),
            message: message.into(),
            severity,
            details: Vec::new(),
        }
    }

    /// Creates a passing result.
    pub fn pass(test: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(test, message, Severity::Pass)
    }

    /// Creates a failure result.
    pub fn fail(test: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(test, message, Severity::Failure)
    }

    /// Creates a failure result with additional detail lines.
    pub fn fail_with_details(
        test: impl Into<String>,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self {
            details,
            ..Self::fail(test, message)
        }
    }

    /// Creates a warning result.
    pub fn warn(test: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(test, message, Severity::Warning)
    }

    /// Creates an internal-error result.
    pub fn error(test: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(test, message, Severity::Error)
    }

    /// Returns true if this result represents a failure.
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }

    /// Returns true if this result represents an engine error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Aggregated results of a run.
#[derive(Debug, Default, Serialize)]
pub struct SuiteReport {
    /// All results in execution order.
    pub results: Vec<CaseResult>,
}

impl SuiteReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result to this report.
    pub fn push(&mut self, result: CaseResult) {
        self.results.push(result);
    }

    /// Extends this report with results from another report.
    pub fn extend(&mut self, other: SuiteReport) {
        self.results.extend(other.results);
    }

    /// Returns the count of passed cases.
    pub fn pass_count(&self) -> usize {
        self.count(Severity::Pass)
    }

    /// Returns the count of failed cases.
    pub fn failure_count(&self) -> usize {
        self.count(Severity::Failure)
    }

    /// Returns the count of engine errors.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Returns the count of warnings.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Returns true if nothing failed or errored.
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0 && self.error_count() == 0
    }

    fn count(&self, severity: Severity) -> usize {
        self.results.iter().filter(|r| r.severity == severity).count()
    }
}
