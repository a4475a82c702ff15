//! Text rendering of graphs for failure diagnostics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sophia_api::serializer::{Stringifier, TripleSerializer};
use sophia_inmem::graph::FastGraph;
use sophia_turtle::serializer::nt::NtSerializer;
use sophia_turtle::serializer::turtle::{TurtleConfig, TurtleSerializer};

use crate::error::GraphError;

/// Text syntax used when a report graph is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializationFormat {
    /// Pretty-printed Turtle.
    #[default]
    Turtle,
    /// One triple per line.
    NTriples,
}

impl fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SerializationFormat::Turtle => "turtle",
            SerializationFormat::NTriples => "ntriples",
        })
    }
}

impl FromStr for SerializationFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(SerializationFormat::Turtle),
            "ntriples" | "nt" | "n-triples" => Ok(SerializationFormat::NTriples),
            other => Err(format!("Unknown serialization format: {other}")),
        }
    }
}

/// Serializes `graph` as text in `format`.
///
/// # Errors
///
/// Returns an error if the serializer rejects a term.
pub fn to_text(graph: &FastGraph, format: SerializationFormat) -> Result<String, GraphError> {
    let text = match format {
        SerializationFormat::Turtle => {
            let config = TurtleConfig::new().with_pretty(true);
            let mut serializer = TurtleSerializer::new_stringifier_with_config(config);
            serializer
                .serialize_graph(graph)
                .map_err(|e| GraphError::Serialize(e.to_string()))?;
            serializer.as_str().to_string()
        }
        SerializationFormat::NTriples => {
            let mut serializer = NtSerializer::new_stringifier();
            serializer
                .serialize_graph(graph)
                .map_err(|e| GraphError::Serialize(e.to_string()))?;
            serializer.as_str().to_string()
        }
    };
    Ok(text)
}
