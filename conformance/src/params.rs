//! Parameter extraction: engine options read from `rpt:` triples on a test case.
//!
//! Literal-valued and reference-valued triples are handled in separate passes
//! and checked against the closed schema in [`rdftest_vocab::params`]:
//!
//! - a literal predicate must be a known scalar, must appear once, and its
//!   lexical form must fit the declared [`ScalarType`];
//! - reference predicates are grouped by name and must be known reference
//!   lists. A group whose single object is an RDF collection is expanded in
//!   list order.

use std::collections::BTreeMap;

use rdftest_vocab::iris;
use rdftest_vocab::params::{lookup_reference_list, lookup_scalar, ScalarType};

use crate::error::ParamError;
use crate::graph::{GraphNavigator, Literal, Node};

/// One extracted option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// A boolean scalar.
    Bool(bool),
    /// An integer scalar.
    Integer(i64),
    /// A free-text scalar.
    Text(String),
    /// Ordered resource identifiers.
    References(Vec<String>),
}

/// Named options for one validation request, keyed by option name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    entries: BTreeMap<String, OptionValue>,
}

impl OptionMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing any earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) {
        self.entries.insert(name.into(), value);
    }

    /// The value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(name)
    }

    /// Returns true if `name` is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The boolean value of `name`, if set to a boolean.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer value of `name`, if set to an integer.
    #[must_use]
    pub fn get_integer(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            OptionValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The text value of `name`, if set to text.
    #[must_use]
    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The references of `name`, if set to a reference list.
    #[must_use]
    pub fn get_references(&self, name: &str) -> Option<&[String]> {
        match self.get(name)? {
            OptionValue::References(refs) => Some(refs),
            _ => None,
        }
    }

    /// Options in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of options set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads the options attached to `case` in `nav`'s graph.
///
/// Pure: the same graph region always yields the same map.
///
/// # Errors
///
/// Returns [`ParamError::Unknown`] for a predicate outside the vocabulary of
/// its extraction mode, [`ParamError::Duplicate`] for a repeated scalar and
/// [`ParamError::InvalidValue`] for a literal that does not fit its type.
pub fn extract(nav: &GraphNavigator<'_>, case: &Node) -> Result<OptionMap, ParamError> {
    let mut options = OptionMap::new();

    for (name, literal) in nav.lit_objs_in(case, iris::RPT) {
        let Some((def, ty)) = lookup_scalar(&name) else {
            return Err(ParamError::Unknown {
                parameter: name,
                case: case.id().to_string(),
            });
        };
        if options.contains(def.name) {
            return Err(ParamError::Duplicate {
                parameter: name,
                case: case.id().to_string(),
            });
        }
        let value = coerce(&literal, ty).ok_or_else(|| ParamError::InvalidValue {
            parameter: name.clone(),
            case: case.id().to_string(),
            expected: ty.as_str(),
            lexical: literal.lexical.clone(),
        })?;
        options.insert(def.name, value);
    }

    let mut refs = nav.ref_objs_in(case, iris::RPT);
    // Stable: keeps emission order within each predicate.
    refs.sort_by(|a, b| a.0.cmp(&b.0));
    for group in refs.chunk_by(|a, b| a.0 == b.0) {
        let name = &group[0].0;
        let Some(def) = lookup_reference_list(name) else {
            return Err(ParamError::Unknown {
                parameter: name.clone(),
                case: case.id().to_string(),
            });
        };
        let ids = group
            .iter()
            .flat_map(|(_, node)| expand(nav, node))
            .collect();
        options.insert(def.name, OptionValue::References(ids));
    }

    Ok(options)
}

fn coerce(literal: &Literal, ty: ScalarType) -> Option<OptionValue> {
    match ty {
        ScalarType::Boolean => literal.as_bool().map(OptionValue::Bool),
        ScalarType::Integer => literal.as_integer().map(OptionValue::Integer),
        ScalarType::Text => Some(OptionValue::Text(literal.lexical.clone())),
    }
}

fn expand(nav: &GraphNavigator<'_>, node: &Node) -> Vec<String> {
    if node.iri() == Some(iris::RDF_NIL) {
        return Vec::new();
    }
    let items = nav.list_items(node);
    if items.is_empty() {
        vec![node.id().to_string()]
    } else {
        items.iter().map(|n| n.id().to_string()).collect()
    }
}
