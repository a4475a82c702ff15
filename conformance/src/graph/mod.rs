//! Graph store and navigation adapters over the `sophia` crates.
//!
//! - [`store`]: parse RDF files into in-memory graphs and map IRIs to local paths
//! - [`nav`]: typed node handles and relation walking over a parsed graph
//! - [`serialize`]: render a (sub)graph as Turtle or N-Triples text

pub mod nav;
pub mod serialize;
pub mod store;

pub use nav::{GraphNavigator, Literal, Node};
pub use serialize::SerializationFormat;
pub use store::RdfFormat;

/// The in-memory graph type used throughout the harness.
pub use sophia_inmem::graph::FastGraph;
