//! Validation dispatch: one engine call per test case.

use std::fmt;

use sophia_inmem::graph::FastGraph;
use tracing::debug;

use crate::case::Action;
use crate::error::{CaseError, EngineError};
use crate::graph::nav::triple_count;
use crate::graph::store;
use crate::params::OptionMap;

/// Inputs for one validation run.
pub struct ValidationRequest {
    /// Graph being checked.
    pub data_graph: FastGraph,
    /// Shapes to check it against.
    pub shapes_graph: FastGraph,
    /// Engine options extracted from the test case.
    pub options: OptionMap,
}

/// What an engine hands back. `report` is `None` when the engine produced
/// no usable report graph.
#[derive(Default)]
pub struct EngineOutput {
    /// Whether the data graph conforms.
    pub conforms: bool,
    /// The validation report graph.
    pub report: Option<FastGraph>,
    /// Free-form engine log.
    pub log: String,
}

/// A checked engine result.
pub struct ValidationOutcome {
    /// Whether the data graph conforms.
    pub conforms: bool,
    /// The validation report graph.
    pub report: FastGraph,
    /// Free-form engine log.
    pub log: String,
}

impl fmt::Debug for ValidationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRequest")
            .field("data_graph", &triple_count(&self.data_graph))
            .field("shapes_graph", &triple_count(&self.shapes_graph))
            .field("options", &self.options)
            .finish()
    }
}

impl fmt::Debug for EngineOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOutput")
            .field("conforms", &self.conforms)
            .field("report", &self.report.as_ref().map(triple_count))
            .field("log", &self.log)
            .finish()
    }
}

impl fmt::Debug for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationOutcome")
            .field("conforms", &self.conforms)
            .field("report", &triple_count(&self.report))
            .field("log", &self.log)
            .finish()
    }
}

/// A SHACL validation engine.
///
/// Implementations must not share mutable state between calls: cases may be
/// dispatched from several threads.
pub trait ValidationEngine: Send + Sync {
    /// Engine name used in logs and errors.
    fn name(&self) -> &str;

    /// Validates `request.data_graph` against `request.shapes_graph`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine could not run.
    fn validate(&self, request: &ValidationRequest) -> Result<EngineOutput, EngineError>;
}

impl<E: ValidationEngine + ?Sized> ValidationEngine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn validate(&self, request: &ValidationRequest) -> Result<EngineOutput, EngineError> {
        (**self).validate(request)
    }
}

/// Parses the action's graphs and runs `engine` on them exactly once.
///
/// Nothing is cached: every call parses both graphs afresh.
///
/// # Errors
///
/// Returns [`CaseError::Graph`] if either graph cannot be loaded, and
/// [`CaseError::Engine`] if the engine fails or returns no report graph.
pub fn dispatch<E: ValidationEngine + ?Sized>(
    engine: &E,
    action: &Action,
    options: OptionMap,
) -> Result<ValidationOutcome, CaseError> {
    let request = ValidationRequest {
        data_graph: store::parse(&action.data_graph)?,
        shapes_graph: store::parse(&action.shapes_graph)?,
        options,
    };
    debug!(
        engine = engine.name(),
        data = %action.data_graph.display(),
        shapes = %action.shapes_graph.display(),
        options = request.options.len(),
        "Dispatching validation"
    );
    let output = engine.validate(&request)?;
    let report = output.report.ok_or_else(|| EngineError::ContractViolation {
        engine: engine.name().to_string(),
    })?;
    Ok(ValidationOutcome {
        conforms: output.conforms,
        report,
        log: output.log,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        calls: AtomicUsize,
        report: bool,
    }

    impl ValidationEngine for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn validate(&self, request: &ValidationRequest) -> Result<EngineOutput, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(request.options.get_bool("debug"), Some(true));
            Ok(EngineOutput {
                conforms: true,
                report: self.report.then(FastGraph::new),
                log: "ok".to_string(),
            })
        }
    }

    fn action(dir: &std::path::Path) -> Action {
        let path = dir.join("graph.ttl");
        fs::write(&path, "<http://example.org/s> <http://example.org/p> 1 .").unwrap();
        Action {
            shapes_graph: path.clone(),
            data_graph: path,
        }
    }

    fn options() -> OptionMap {
        let mut options = OptionMap::new();
        options.insert("debug", crate::params::OptionValue::Bool(true));
        options
    }

    #[test]
    fn engine_runs_once() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Fixed {
            calls: AtomicUsize::new(0),
            report: true,
        };
        let outcome = dispatch(&engine, &action(dir.path()), options()).unwrap();
        assert!(outcome.conforms);
        assert_eq!(outcome.log, "ok");
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_report_is_contract_violation() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Fixed {
            calls: AtomicUsize::new(0),
            report: false,
        };
        let err = dispatch(&engine, &action(dir.path()), options()).unwrap_err();
        assert!(err.is_internal());
        assert!(matches!(
            err,
            CaseError::Engine(EngineError::ContractViolation { engine }) if engine == "fixed"
        ));
    }

    #[test]
    fn unreadable_graph_skips_engine() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Fixed {
            calls: AtomicUsize::new(0),
            report: true,
        };
        let action = Action {
            shapes_graph: dir.path().join("missing.ttl"),
            data_graph: dir.path().join("missing.ttl"),
        };
        let err = dispatch(&engine, &action, options()).unwrap_err();
        assert!(matches!(err, CaseError::Graph(_)));
        assert!(!err.is_internal());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }
}
