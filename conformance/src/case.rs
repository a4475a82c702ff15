//! Collected test cases.
//!
//! A case is only built once its action and expected result are fully
//! resolved; a case node missing either is a [`ManifestError`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rdftest_vocab::iris;
use sophia_inmem::graph::FastGraph;

use crate::error::{GraphError, ManifestError, ParamError};
use crate::graph::store::uri_to_path;
use crate::graph::{GraphNavigator, Node};
use crate::params::{self, OptionMap};

/// The graphs a test case validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Local path of the shapes graph.
    pub shapes_graph: PathBuf,
    /// Local path of the data graph.
    pub data_graph: PathBuf,
}

/// The expected result node and its conformance flag.
#[derive(Debug, Clone)]
pub struct ExpectedResult {
    /// The `mf:result` node in the manifest graph.
    pub node: Node,
    /// Value of `sh:conforms` on that node.
    pub conforms: bool,
}

/// One runnable test case.
///
/// Holds a shared handle to the manifest graph it came from, so options and
/// the expected report can be read without reparsing the manifest.
#[derive(Clone)]
pub struct TestCase {
    /// Node identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Manifest file the case was declared in.
    pub manifest: PathBuf,
    /// Shapes and data graphs.
    pub action: Action,
    /// Expected outcome.
    pub expected: ExpectedResult,
    node: Node,
    graph: Arc<FastGraph>,
}

impl TestCase {
    /// Builds the case declared at `node` in the manifest graph.
    pub(crate) fn collect(
        graph: &Arc<FastGraph>,
        node: Node,
        manifest: &Path,
    ) -> Result<Self, ManifestError> {
        let nav = GraphNavigator::new(graph);

        let name = nav
            .lit_obj_opt(&node, iris::MF_NAME)
            .or_else(|| nav.lit_obj_opt(&node, iris::RDFS_LABEL))
            .map_or_else(|| node.id().to_string(), |lit| lit.lexical);

        let action_node = nav.ref_obj(&node, iris::MF_ACTION)?;
        let action = Action {
            shapes_graph: local_resource(&nav.ref_obj(&action_node, iris::SHT_SHAPES_GRAPH)?)?,
            data_graph: local_resource(&nav.ref_obj(&action_node, iris::SHT_DATA_GRAPH)?)?,
        };

        let result_node = nav.ref_obj(&node, iris::MF_RESULT)?;
        let conforms_lit = nav.lit_obj(&result_node, iris::SH_CONFORMS)?;
        let conforms = conforms_lit
            .as_bool()
            .ok_or_else(|| ManifestError::InvalidConformance {
                case: node.id().to_string(),
                lexical: conforms_lit.lexical.clone(),
            })?;

        Ok(Self {
            id: node.id().to_string(),
            name,
            manifest: manifest.to_path_buf(),
            action,
            expected: ExpectedResult {
                node: result_node,
                conforms,
            },
            node,
            graph: Arc::clone(graph),
        })
    }

    /// The case node in its manifest graph.
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// A navigator over the manifest graph.
    #[must_use]
    pub fn navigator(&self) -> GraphNavigator<'_> {
        GraphNavigator::new(&self.graph)
    }

    /// Engine options attached to the case.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown, duplicate or ill-typed parameters.
    pub fn extract_options(&self) -> Result<OptionMap, ParamError> {
        params::extract(&self.navigator(), &self.node)
    }

    /// The expected result's concise bounded description.
    ///
    /// # Errors
    ///
    /// Returns an error if the subgraph cannot be built.
    pub fn expected_report(&self) -> Result<FastGraph, GraphError> {
        self.navigator().subgraph(&self.expected.node)
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("manifest", &self.manifest)
            .field("action", &self.action)
            .field("expected", &self.expected)
            .finish_non_exhaustive()
    }
}

fn local_resource(node: &Node) -> Result<PathBuf, ManifestError> {
    let iri = node
        .iri()
        .ok_or_else(|| ManifestError::NotAResource(node.id().to_string()))?;
    Ok(uri_to_path(iri)?)
}
