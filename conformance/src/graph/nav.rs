//! Graph navigation: typed node handles and relation walking.
//!
//! A [`GraphNavigator`] borrows a parsed graph and answers the questions the
//! resolver, extractor and comparator ask of it: which nodes have a type,
//! what a node points at through a predicate, which literals hang off it,
//! and what its concise bounded description is.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use rdftest_vocab::iris::{self, local_name};
use sophia_api::graph::{Graph, MutableGraph};
use sophia_api::term::matcher::Any;
use sophia_api::term::{IriRef, SimpleTerm, Term, TermKind};
use sophia_api::triple::Triple;
use sophia_inmem::graph::FastGraph;

use crate::error::{GraphError, NavError};

/// A resource node: an IRI or a blank node.
///
/// Blank nodes are identified as `_:label`; labels are only meaningful
/// within the graph the node came from.
#[derive(Debug, Clone)]
pub struct Node {
    term: SimpleTerm<'static>,
    id: String,
}

impl Node {
    /// Wraps an IRI or blank-node term. Returns `None` for literals.
    #[must_use]
    pub fn from_term<T: Term>(term: T) -> Option<Self> {
        let id = match term.kind() {
            TermKind::Iri => term.iri()?.as_str().to_string(),
            TermKind::BlankNode => format!("_:{}", term.bnode_id()?.as_str()),
            _ => return None,
        };
        Some(Self {
            term: term.into_term(),
            id,
        })
    }

    /// The IRI, or `_:label` for blank nodes.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The IRI, if this is not a blank node.
    #[must_use]
    pub fn iri(&self) -> Option<&str> {
        (!self.is_blank()).then_some(self.id.as_str())
    }

    /// Returns true for blank nodes.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.term.is_blank_node()
    }

    /// The underlying term.
    #[must_use]
    pub fn term(&self) -> &SimpleTerm<'static> {
        &self.term
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "<{}>", self.id)
        }
    }
}

/// A literal value projected out of a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// Lexical form.
    pub lexical: String,
    /// Datatype IRI.
    pub datatype: Option<String>,
    /// Language tag, for `rdf:langString` literals.
    pub language: Option<String>,
}

impl Literal {
    /// Projects a literal term. Returns `None` for IRIs and blank nodes.
    #[must_use]
    pub fn from_term<T: Term>(term: T) -> Option<Self> {
        if !term.is_literal() {
            return None;
        }
        let lexical = term.lexical_form()?;
        Some(Self {
            lexical: String::from(&*lexical),
            datatype: term.datatype().map(|dt| dt.as_str().to_string()),
            language: term.language_tag().map(|tag| tag.as_str().to_string()),
        })
    }

    /// Interprets the lexical form as an `xsd:boolean`, ignoring case.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.lexical.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    /// Interprets the lexical form as an integer.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        self.lexical.trim().parse().ok()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.lexical)?;
        match (&self.language, &self.datatype) {
            (Some(tag), _) => write!(f, "@{tag}"),
            (None, Some(dt)) if dt != iris::XSD_STRING => write!(f, "^^<{dt}>"),
            _ => Ok(()),
        }
    }
}

/// Read-only navigation over a parsed graph.
#[derive(Clone, Copy)]
pub struct GraphNavigator<'g> {
    graph: &'g FastGraph,
}

impl<'g> GraphNavigator<'g> {
    /// Creates a navigator over `graph`.
    #[must_use]
    pub fn new(graph: &'g FastGraph) -> Self {
        Self { graph }
    }

    /// The graph being navigated.
    #[must_use]
    pub fn graph(&self) -> &'g FastGraph {
        self.graph
    }

    /// All nodes with `rdf:type <class>`.
    #[must_use]
    pub fn instances(&self, class: &str) -> Vec<Node> {
        self.graph
            .triples_matching(
                Any,
                [IriRef::new_unchecked(iris::RDF_TYPE)],
                [IriRef::new_unchecked(class)],
            )
            .filter_map(Result::ok)
            .filter_map(|t| Node::from_term(t.s()))
            .collect()
    }

    /// The first node with `rdf:type <class>`, if any.
    #[must_use]
    pub fn instance(&self, class: &str) -> Option<Node> {
        self.instances(class).into_iter().next()
    }

    /// Resource objects of `node` via `predicate`. RDF collections are
    /// expanded in list order; literal objects are ignored.
    #[must_use]
    pub fn ref_objs(&self, node: &Node, predicate: &str) -> Vec<Node> {
        let mut out = Vec::new();
        for object in self.objects(node, predicate) {
            let Some(object) = Node::from_term(object) else {
                continue;
            };
            if object.iri() == Some(iris::RDF_NIL) {
                continue;
            }
            if self.is_list(&object) {
                out.extend(self.list_items(&object));
            } else {
                out.push(object);
            }
        }
        out
    }

    /// The single resource object of `node` via `predicate`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no such object or more than one.
    pub fn ref_obj(&self, node: &Node, predicate: &str) -> Result<Node, NavError> {
        let refs = self
            .objects(node, predicate)
            .into_iter()
            .filter_map(Node::from_term)
            .collect();
        exactly_one(refs, node, predicate)
    }

    /// The single literal object of `node` via `predicate`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no such literal or more than one.
    pub fn lit_obj(&self, node: &Node, predicate: &str) -> Result<Literal, NavError> {
        let literals = self
            .objects(node, predicate)
            .into_iter()
            .filter_map(Literal::from_term)
            .collect();
        exactly_one(literals, node, predicate)
    }

    /// The first literal object of `node` via `predicate`, if any.
    #[must_use]
    pub fn lit_obj_opt(&self, node: &Node, predicate: &str) -> Option<Literal> {
        self.objects(node, predicate)
            .into_iter()
            .find_map(Literal::from_term)
    }

    /// Literal-valued triples on `node` whose predicate lies in `namespace`,
    /// as `(local name, literal)` pairs.
    #[must_use]
    pub fn lit_objs_in(&self, node: &Node, namespace: &str) -> Vec<(String, Literal)> {
        self.objects_in(node, namespace)
            .into_iter()
            .filter_map(|(local, object)| Some((local, Literal::from_term(object)?)))
            .collect()
    }

    /// Resource-valued triples on `node` whose predicate lies in `namespace`,
    /// as `(local name, node)` pairs.
    #[must_use]
    pub fn ref_objs_in(&self, node: &Node, namespace: &str) -> Vec<(String, Node)> {
        self.objects_in(node, namespace)
            .into_iter()
            .filter_map(|(local, object)| Some((local, Node::from_term(object)?)))
            .collect()
    }

    /// Items of the RDF collection starting at `head`, in list order.
    /// A malformed or cyclic list stops at the first repeated cell.
    #[must_use]
    pub fn list_items(&self, head: &Node) -> Vec<Node> {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = Some(head.clone());
        while let Some(cell) = cursor.take() {
            if cell.iri() == Some(iris::RDF_NIL) || !seen.insert(cell.id.clone()) {
                break;
            }
            items.extend(
                self.objects(&cell, iris::RDF_FIRST)
                    .into_iter()
                    .filter_map(Node::from_term),
            );
            cursor = self
                .objects(&cell, iris::RDF_REST)
                .into_iter()
                .find_map(Node::from_term);
        }
        items
    }

    /// The concise bounded description of `root`: every triple whose subject
    /// is `root`, plus, recursively, the description of each blank-node object.
    ///
    /// # Errors
    ///
    /// Returns an error if the output graph rejects a triple.
    pub fn subgraph(&self, root: &Node) -> Result<FastGraph, GraphError> {
        let mut out = FastGraph::new();
        let mut seen = HashSet::new();
        let mut pending = vec![root.clone()];
        while let Some(node) = pending.pop() {
            if !seen.insert(node.id.clone()) {
                continue;
            }
            for t in self
                .graph
                .triples_matching([node.term.clone()], Any, Any)
                .filter_map(Result::ok)
            {
                out.insert(t.s(), t.p(), t.o())
                    .map_err(|e| GraphError::Store(e.to_string()))?;
                if t.o().is_blank_node() {
                    pending.extend(Node::from_term(t.o()));
                }
            }
        }
        Ok(out)
    }

    fn is_list(&self, node: &Node) -> bool {
        !self.objects(node, iris::RDF_FIRST).is_empty()
    }

    fn objects(&self, node: &Node, predicate: &str) -> Vec<SimpleTerm<'static>> {
        self.graph
            .triples_matching(
                [node.term.clone()],
                [IriRef::new_unchecked(predicate)],
                Any,
            )
            .filter_map(Result::ok)
            .map(|t| t.o().into_term())
            .collect()
    }

    fn objects_in(&self, node: &Node, namespace: &str) -> Vec<(String, SimpleTerm<'static>)> {
        self.graph
            .triples_matching([node.term.clone()], Any, Any)
            .filter_map(Result::ok)
            .filter_map(|t| {
                let predicate = t.p().iri()?;
                let local = local_name(predicate.as_str(), namespace)?.to_string();
                Some((local, t.o().into_term()))
            })
            .collect()
    }
}

fn exactly_one<T>(mut items: Vec<T>, node: &Node, predicate: &str) -> Result<T, NavError> {
    if items.len() > 1 {
        return Err(NavError::Ambiguous {
            node: node.id.clone(),
            predicate: predicate.to_string(),
            count: items.len(),
        });
    }
    items.pop().ok_or_else(|| NavError::Missing {
        node: node.id.clone(),
        predicate: predicate.to_string(),
    })
}

/// Number of triples in `graph`.
#[must_use]
pub fn triple_count(graph: &FastGraph) -> usize {
    graph.triples().count()
}
