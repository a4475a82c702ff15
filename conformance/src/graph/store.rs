//! Graph store: parse RDF documents into [`FastGraph`]s.
//!
//! Files are parsed with their own `file://` URI as base IRI, so `<>` and
//! relative references such as `<data.ttl>` resolve next to the document.
//! Only `file:` IRIs map back to local paths.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sophia_api::graph::MutableGraph;
use sophia_api::parser::{QuadParser, TripleParser};
use sophia_api::quad::Quad;
use sophia_api::source::{QuadSource, TripleSource};
use sophia_inmem::graph::FastGraph;
use sophia_iri::Iri;
use sophia_jsonld::{JsonLdOptions, JsonLdParser};
use sophia_turtle::parser::nt;
use sophia_turtle::parser::turtle::TurtleParser;
use tracing::debug;
use url::Url;

use crate::error::GraphError;
use crate::graph::nav::triple_count;

/// RDF syntaxes the store can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle 1.1.
    Turtle,
    /// N-Triples.
    NTriples,
    /// JSON-LD 1.1 (default graph and named graphs are merged).
    JsonLd,
}

impl RdfFormat {
    /// Picks the syntax from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "nt" => Some(RdfFormat::NTriples),
            "json" | "jsonld" | "json-ld" => Some(RdfFormat::JsonLd),
            _ => None,
        }
    }
}

/// Parses the RDF document at `path`.
///
/// # Errors
///
/// Returns an error if the extension is not a known RDF syntax, the file
/// cannot be read, or the document is malformed.
pub fn parse(path: &Path) -> Result<FastGraph, GraphError> {
    let format =
        RdfFormat::from_path(path).ok_or_else(|| GraphError::UnknownFormat(path.to_path_buf()))?;
    let src = fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path_to_uri(path)?;
    let graph = parse_str(&src, format, Some(&base))?;
    debug!(
        path = %path.display(),
        triples = triple_count(&graph),
        "Parsed graph"
    );
    Ok(graph)
}

/// Parses an RDF document held in memory.
///
/// `base` resolves relative IRIs in Turtle and JSON-LD documents. N-Triples
/// has no relative IRIs. A JSON-LD `@base` in the document overrides `base`.
///
/// # Errors
///
/// Returns an error if `base` is not a valid IRI or the document is malformed.
pub fn parse_str(src: &str, format: RdfFormat, base: Option<&str>) -> Result<FastGraph, GraphError> {
    let origin = base.unwrap_or("<inline>");
    let parse_error = |message: String| GraphError::Parse {
        origin: origin.to_string(),
        message,
    };

    match format {
        RdfFormat::Turtle => {
            let base = base
                .map(|iri| Iri::new(iri.to_string()))
                .transpose()
                .map_err(|_| GraphError::InvalidBase(origin.to_string()))?;
            TurtleParser { base }
                .parse(src.as_bytes())
                .collect_triples::<FastGraph>()
                .map_err(|e| parse_error(e.to_string()))
        }
        RdfFormat::NTriples => nt::parse_bufread(src.as_bytes())
            .collect_triples::<FastGraph>()
            .map_err(|e| parse_error(e.to_string())),
        RdfFormat::JsonLd => {
            let mut options = JsonLdOptions::new()
                .with_default_document_loader::<sophia_jsonld::loader::NoLoader>();
            if let Some(iri) = base {
                let iri = Iri::<Arc<str>>::new(Arc::from(iri))
                    .map_err(|_| GraphError::InvalidBase(origin.to_string()))?;
                options = options.with_base(iri);
            }
            let mut graph = FastGraph::new();
            QuadParser::parse_str(&JsonLdParser::new_with_options(options), src)
                .try_for_each_quad(|q| graph.insert(q.s(), q.p(), q.o()).map(|_| ()))
                .map_err(|e| parse_error(e.to_string()))?;
            Ok(graph)
        }
    }
}

/// Returns the `file://` URI of an existing local file.
///
/// # Errors
///
/// Returns an error if the path does not exist.
pub fn path_to_uri(path: &Path) -> Result<String, GraphError> {
    let absolute = fs::canonicalize(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Url::from_file_path(&absolute)
        .map(|url| url.to_string())
        .map_err(|()| GraphError::UnresolvableIri(absolute.display().to_string()))
}

/// Maps a `file:` IRI to a local path. The path is not required to exist.
///
/// # Errors
///
/// Returns an error for malformed IRIs and for any scheme other than `file`.
pub fn uri_to_path(uri: &str) -> Result<PathBuf, GraphError> {
    let url = Url::parse(uri).map_err(|_| GraphError::UnresolvableIri(uri.to_string()))?;
    if url.scheme() != "file" {
        return Err(GraphError::UnresolvableIri(uri.to_string()));
    }
    url.to_file_path()
        .map_err(|()| GraphError::UnresolvableIri(uri.to_string()))
}
