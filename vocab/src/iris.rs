//! Namespace and term IRIs.
//!
//! Term constants are full IRIs so they can be matched against parsed graphs
//! without prefix expansion.

/// W3C test manifest namespace.
pub const MF: &str = "http://www.w3.org/2001/sw/DataAccess/tests/test-manifest#";
/// SHACL test-suite namespace.
pub const SHT: &str = "http://www.w3.org/ns/shacl-test#";
/// SHACL namespace.
pub const SH: &str = "http://www.w3.org/ns/shacl#";
/// RDF namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// RDFS namespace.
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// XSD namespace.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// Private parameter namespace. Every predicate in it names one engine option.
pub const RPT: &str = "https://w3id.org/WEHI-SODA-Hub/rdfpytest/";

// Manifest vocabulary
/// Class of manifest nodes.
pub const MF_MANIFEST: &str = "http://www.w3.org/2001/sw/DataAccess/tests/test-manifest#Manifest";
/// Manifest to sub-manifest reference.
pub const MF_INCLUDE: &str = "http://www.w3.org/2001/sw/DataAccess/tests/test-manifest#include";
/// Manifest to test-case reference (repeated or as an RDF collection).
pub const MF_ENTRIES: &str = "http://www.w3.org/2001/sw/DataAccess/tests/test-manifest#entries";
/// Test case to action.
pub const MF_ACTION: &str = "http://www.w3.org/2001/sw/DataAccess/tests/test-manifest#action";
/// Test case to expected result.
pub const MF_RESULT: &str = "http://www.w3.org/2001/sw/DataAccess/tests/test-manifest#result";
/// Test case display name.
pub const MF_NAME: &str = "http://www.w3.org/2001/sw/DataAccess/tests/test-manifest#name";

// Action vocabulary
/// Action to shapes graph.
pub const SHT_SHAPES_GRAPH: &str = "http://www.w3.org/ns/shacl-test#shapesGraph";
/// Action to data graph.
pub const SHT_DATA_GRAPH: &str = "http://www.w3.org/ns/shacl-test#dataGraph";

// SHACL report vocabulary
/// Class of validation report nodes.
pub const SH_VALIDATION_REPORT: &str = "http://www.w3.org/ns/shacl#ValidationReport";
/// Report conformance flag.
pub const SH_CONFORMS: &str = "http://www.w3.org/ns/shacl#conforms";

// RDF core
/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// `rdf:first`.
pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
/// `rdf:rest`.
pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
/// `rdf:nil`.
pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
/// `rdfs:label`.
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

// Datatypes
/// `xsd:boolean`.
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
/// `xsd:string`.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Returns the local name of `iri` within `namespace`, if `iri` lies in it.
///
/// The local name must be non-empty.
#[must_use]
pub fn local_name<'a>(iri: &'a str, namespace: &str) -> Option<&'a str> {
    iri.strip_prefix(namespace).filter(|local| !local.is_empty())
}
