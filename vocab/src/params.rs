//! Closed schema of engine parameters.
//!
//! A test case may attach options for the validation engine as triples whose
//! predicate lies in [`crate::iris::RPT`]. The local name of the predicate is
//! the option name. Only the names in [`PARAMETERS`] are recognized; anything
//! else is rejected by the extractor.
//!
//! - **Scalar** parameters take exactly one literal value.
//! - **Reference-list** parameters take an ordered list of resource references.

use std::fmt;

use ParamKind::{ReferenceList, Scalar};
use ScalarType::{Boolean, Integer, Text};

/// Value type of a scalar parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    /// `true`, `false`, `1` or `0`, in any case.
    Boolean,
    /// A signed integer.
    Integer,
    /// Any lexical form, passed through unchanged.
    Text,
}

impl ScalarType {
    /// Returns the name used in error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::Boolean => "boolean",
            ScalarType::Integer => "integer",
            ScalarType::Text => "text",
        }
    }
}

/// How a parameter is read from the test-case node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// One literal value of the given type.
    Scalar(ScalarType),
    /// An ordered list of resource identifiers.
    ReferenceList,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar(ty) => f.write_str(ty.as_str()),
            ReferenceList => f.write_str("reference list"),
        }
    }
}

/// A recognized engine parameter.
#[derive(Debug, Clone)]
pub struct ParamDef {
    /// Option name, equal to the predicate's local name in the parameter namespace.
    pub name: &'static str,
    /// Extraction mode and value type.
    pub kind: ParamKind,
    /// What the option does in the validation engine.
    pub comment: &'static str,
}

impl ParamDef {
    /// Returns true if this parameter takes a single literal.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, ParamKind::Scalar(_))
    }
}

impl fmt::Display for ParamDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.kind, self.comment)
    }
}

/// Every recognized parameter. Scalars first, then reference lists.
pub const PARAMETERS: &[ParamDef] = &[
    ParamDef {
        name: "advanced",
        kind: Scalar(Boolean),
        comment: "Enable SHACL Advanced Features (rules, custom targets, functions).",
    },
    ParamDef {
        name: "inference",
        kind: Scalar(Text),
        comment: "Inference to apply to the data graph before validation \
                  (none, rdfs, owlrl or both).",
    },
    ParamDef {
        name: "inplace",
        kind: Scalar(Boolean),
        comment: "Mutate the data graph in place instead of validating a copy.",
    },
    ParamDef {
        name: "abort_on_first",
        kind: Scalar(Boolean),
        comment: "Stop at the first constraint violation.",
    },
    ParamDef {
        name: "allow_infos",
        kind: Scalar(Boolean),
        comment: "Results of severity sh:Info do not break conformance.",
    },
    ParamDef {
        name: "allow_warnings",
        kind: Scalar(Boolean),
        comment: "Results of severity sh:Warning or sh:Info do not break conformance.",
    },
    ParamDef {
        name: "max_validation_depth",
        kind: Scalar(Integer),
        comment: "Maximum recursion depth for nested shape evaluation.",
    },
    ParamDef {
        name: "sparql_mode",
        kind: Scalar(Boolean),
        comment: "Treat the data graph as a remote SPARQL endpoint.",
    },
    ParamDef {
        name: "debug",
        kind: Scalar(Boolean),
        comment: "Emit engine debug output into the validation log.",
    },
    ParamDef {
        name: "js",
        kind: Scalar(Boolean),
        comment: "Enable SHACL-JS features.",
    },
    ParamDef {
        name: "meta_shacl",
        kind: Scalar(Boolean),
        comment: "Validate the shapes graph against the SHACL-SHACL shapes first.",
    },
    ParamDef {
        name: "iterate_rules",
        kind: Scalar(Boolean),
        comment: "Run SHACL rules repeatedly until the data graph stops changing.",
    },
    ParamDef {
        name: "check_dash_result",
        kind: Scalar(Boolean),
        comment: "Compare the report against DASH test-case expectations in the data graph.",
    },
    ParamDef {
        name: "do_owl_imports",
        kind: Scalar(Boolean),
        comment: "Resolve owl:imports in the shapes graph before validation.",
    },
    ParamDef {
        name: "focus_nodes",
        kind: ReferenceList,
        comment: "Restrict validation to these focus nodes.",
    },
    ParamDef {
        name: "use_shapes",
        kind: ReferenceList,
        comment: "Restrict validation to these shapes.",
    },
];

/// Looks up a parameter by option name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static ParamDef> {
    PARAMETERS.iter().find(|def| def.name == name)
}

/// Looks up a scalar parameter by option name.
#[must_use]
pub fn lookup_scalar(name: &str) -> Option<(&'static ParamDef, ScalarType)> {
    lookup(name).and_then(|def| match def.kind {
        Scalar(ty) => Some((def, ty)),
        ReferenceList => None,
    })
}

/// Looks up a reference-list parameter by option name.
#[must_use]
pub fn lookup_reference_list(name: &str) -> Option<&'static ParamDef> {
    lookup(name).filter(|def| def.kind == ReferenceList)
}
