//! Vocabulary used by rdftest manifests, encoded as typed Rust data.
//!
//! The `rdftest-vocab` crate holds two things:
//!
//! - [`iris`]: the IRIs of every manifest, SHACL and RDF term the harness
//!   reads, plus the private parameter namespace [`iris::RPT`].
//! - [`params`]: the closed schema of engine parameters that a test case may
//!   carry in the [`iris::RPT`] namespace.
//!
//! # Entry Point
//!
//! ```
//! use rdftest_vocab::params::{lookup, ParamKind};
//!
//! let def = lookup("focus_nodes").expect("known parameter");
//! assert_eq!(def.kind, ParamKind::ReferenceList);
//! assert!(lookup("not_a_parameter").is_none());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod iris;
pub mod params;

pub use params::{lookup, ParamDef, ParamKind, ScalarType, PARAMETERS};
