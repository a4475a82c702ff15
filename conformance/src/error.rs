//! Error types, one enum per concern.
//!
//! Every error raised while collecting or running a test case is scoped to
//! that case (or to the include branch that raised it); none of them aborts
//! sibling cases. [`CaseError::is_internal`] separates engine faults from
//! ordinary test failures.

use std::path::PathBuf;

use thiserror::Error;

/// Failure in the graph store adapter: reading, parsing or serializing RDF.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The resource could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file extension does not name a supported RDF syntax.
    #[error("Unsupported RDF format: {}", .0.display())]
    UnknownFormat(PathBuf),
    /// The document is not well-formed.
    #[error("Failed to parse {origin}: {message}")]
    Parse {
        /// Base IRI or path of the document.
        origin: String,
        /// Parser message.
        message: String,
    },
    /// The base IRI derived for a document is not a valid IRI.
    #[error("Invalid base IRI: {0}")]
    InvalidBase(String),
    /// The IRI does not map to a local file.
    #[error("IRI does not name a local resource: {0}")]
    UnresolvableIri(String),
    /// A triple could not be inserted into an in-memory graph.
    #[error("Failed to build graph: {0}")]
    Store(String),
    /// A graph could not be written out as text.
    #[error("Failed to serialize graph: {0}")]
    Serialize(String),
}

/// Failure to follow a relation that must be present exactly once.
#[derive(Debug, Error)]
pub enum NavError {
    /// No value for the predicate.
    #[error("{node} has no {predicate}")]
    Missing {
        /// Subject node identifier.
        node: String,
        /// Predicate IRI.
        predicate: String,
    },
    /// More than one value where exactly one is required.
    #[error("{node} has {count} values for {predicate}, expected exactly one")]
    Ambiguous {
        /// Subject node identifier.
        node: String,
        /// Predicate IRI.
        predicate: String,
        /// Number of values found.
        count: usize,
    },
}

/// Manifest structure error, raised while building the test tree.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest or an included manifest could not be loaded.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// A required relation (action, result, graph reference) is missing or ambiguous.
    #[error(transparent)]
    Nav(#[from] NavError),
    /// An include points at a resource that does not exist locally.
    #[error("Included manifest {} does not exist: {source}", .path.display())]
    MissingResource {
        /// Path the include resolved to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A reference that must name a resource is a blank node.
    #[error("{0} must be an IRI")]
    NotAResource(String),
    /// The expected result's `sh:conforms` is not a boolean.
    #[error("Expected result of {case} has non-boolean sh:conforms {lexical:?}")]
    InvalidConformance {
        /// Test case identifier.
        case: String,
        /// Offending lexical form.
        lexical: String,
    },
}

/// Parameter extraction error. Fatal to the test case, raised before any
/// engine invocation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    /// The predicate is outside the recognized vocabulary for its extraction mode.
    #[error("Unknown parameter {parameter} in test case {case}")]
    Unknown {
        /// Local name of the predicate in the parameter namespace.
        parameter: String,
        /// Test case identifier.
        case: String,
    },
    /// A scalar parameter appears more than once.
    #[error("Duplicate parameter {parameter} in test case {case}")]
    Duplicate {
        /// Local name of the predicate in the parameter namespace.
        parameter: String,
        /// Test case identifier.
        case: String,
    },
    /// The literal does not fit the parameter's declared type.
    #[error("Parameter {parameter} in test case {case} expects a {expected} literal, got {lexical:?}")]
    InvalidValue {
        /// Local name of the predicate in the parameter namespace.
        parameter: String,
        /// Test case identifier.
        case: String,
        /// Declared scalar type.
        expected: &'static str,
        /// Offending lexical form.
        lexical: String,
    },
}

/// Validation engine failure. Always an internal error, never a test failure.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine returned no usable report graph.
    #[error("{engine} did not return a validation report graph")]
    ContractViolation {
        /// Engine name.
        engine: String,
    },
    /// The engine ran but reported an error of its own.
    #[error("{engine} failed: {message}")]
    Failed {
        /// Engine name.
        engine: String,
        /// Engine output describing the failure.
        message: String,
    },
    /// The engine could not be started or its scratch files written.
    #[error("I/O error while running {engine}: {source}")]
    Io {
        /// Engine name.
        engine: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A request graph could not be handed to the engine.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Any error that stops a single collected test case from producing a verdict.
#[derive(Debug, Error)]
pub enum CaseError {
    /// Parameter extraction failed.
    #[error(transparent)]
    Param(#[from] ParamError),
    /// The action's graphs could not be loaded, or a report could not be rendered.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The engine failed or broke its contract.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl CaseError {
    /// Returns true for engine faults, which are reported apart from test failures.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, CaseError::Engine(_))
    }
}

/// Harness configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for [`crate::config::HarnessConfig`].
    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        /// Configuration file path.
        path: PathBuf,
        /// TOML error.
        #[source]
        source: toml::de::Error,
    },
}
