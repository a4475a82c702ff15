//! Manifest resolution: builds the test tree from a manifest file.
//!
//! Every `mf:Manifest` node in the parsed graph contributes its
//! `mf:include` references first, then its `mf:entries`, each in the order
//! the navigator returns them (collections in list order).
//!
//! A single resolution tracks every manifest file it has expanded. An include
//! that points at an already expanded file, whether through a cycle or a
//! diamond, becomes a [`ManifestItem::Revisited`] leaf and is not expanded
//! again, so resolution always terminates.
//!
//! Errors are scoped: a broken include or case becomes a
//! [`ManifestItem::Error`] and its siblings still collect.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rdftest_vocab::iris;
use tracing::{debug, info, warn};

use crate::case::TestCase;
use crate::error::{GraphError, ManifestError};
use crate::graph::store::{self, uri_to_path};
use crate::graph::{GraphNavigator, Node};

/// One child of a manifest.
#[derive(Debug)]
pub enum ManifestItem {
    /// An included manifest, fully expanded.
    SubManifest(ManifestTree),
    /// A collected test case.
    Case(TestCase),
    /// An include of a manifest already expanded in this resolution.
    Revisited(PathBuf),
    /// An include or case that failed to collect.
    Error(CollectError),
}

/// A collection failure attributed to the include or case that raised it.
#[derive(Debug)]
pub struct CollectError {
    /// Identifier of the include reference or case node.
    pub origin: String,
    /// What went wrong.
    pub error: ManifestError,
}

/// A resolved manifest and its children.
#[derive(Debug)]
pub struct ManifestTree {
    /// Canonical path of the manifest file.
    pub path: PathBuf,
    /// Children in resolution order.
    pub items: Vec<ManifestItem>,
}

impl ManifestTree {
    /// Every collected case in the tree, depth first.
    #[must_use]
    pub fn cases(&self) -> Vec<&TestCase> {
        let mut out = Vec::new();
        self.collect_cases(&mut out);
        out
    }

    fn collect_cases<'a>(&'a self, out: &mut Vec<&'a TestCase>) {
        for item in &self.items {
            match item {
                ManifestItem::Case(case) => out.push(case),
                ManifestItem::SubManifest(tree) => tree.collect_cases(out),
                ManifestItem::Revisited(_) | ManifestItem::Error(_) => {}
            }
        }
    }

    /// Number of collected cases in the tree.
    #[must_use]
    pub fn case_count(&self) -> usize {
        self.cases().len()
    }

    /// Returns true if the manifest has no children at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Resolves a manifest file and everything it includes.
///
/// # Errors
///
/// Returns an error only if the root manifest itself cannot be loaded.
/// Failures below the root are reported as [`ManifestItem::Error`] items.
pub fn resolve(path: &Path) -> Result<ManifestTree, ManifestError> {
    Resolver::default().resolve(path)
}

/// Resolution state for one root manifest.
#[derive(Debug, Default)]
pub struct Resolver {
    visited: HashSet<PathBuf>,
}

impl Resolver {
    /// Resolves `path`, skipping manifests this resolver already expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be read or parsed.
    pub fn resolve(&mut self, path: &Path) -> Result<ManifestTree, ManifestError> {
        let path = fs::canonicalize(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.visited.insert(path.clone());

        let graph = Arc::new(store::parse(&path)?);
        let nav = GraphNavigator::new(&graph);
        let manifests = nav.instances(iris::MF_MANIFEST);
        if manifests.is_empty() {
            warn!(path = %path.display(), "No mf:Manifest node found");
        }

        let mut items = Vec::new();
        for manifest in &manifests {
            for include in nav.ref_objs(manifest, iris::MF_INCLUDE) {
                items.push(self.include(&include));
            }
            for entry in nav.ref_objs(manifest, iris::MF_ENTRIES) {
                let origin = entry.id().to_string();
                items.push(match TestCase::collect(&graph, entry, &path) {
                    Ok(case) => ManifestItem::Case(case),
                    Err(error) => ManifestItem::Error(CollectError { origin, error }),
                });
            }
        }

        let tree = ManifestTree { path, items };
        info!(
            path = %tree.path.display(),
            cases = tree.items.iter().filter(|i| matches!(i, ManifestItem::Case(_))).count(),
            "Resolved manifest"
        );
        Ok(tree)
    }

    fn include(&mut self, reference: &Node) -> ManifestItem {
        let origin = reference.id().to_string();
        let target = match include_target(reference) {
            Ok(target) => target,
            Err(error) => return ManifestItem::Error(CollectError { origin, error }),
        };
        if self.visited.contains(&target) {
            warn!(path = %target.display(), "Manifest already resolved, skipping include");
            return ManifestItem::Revisited(target);
        }
        debug!(path = %target.display(), "Following include");
        match self.resolve(&target) {
            Ok(tree) => ManifestItem::SubManifest(tree),
            Err(error) => ManifestItem::Error(CollectError { origin, error }),
        }
    }
}

fn include_target(reference: &Node) -> Result<PathBuf, ManifestError> {
    let iri = reference
        .iri()
        .ok_or_else(|| ManifestError::NotAResource(reference.id().to_string()))?;
    let path = uri_to_path(iri)?;
    fs::canonicalize(&path).map_err(|source| ManifestError::MissingResource { path, source })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SHAPES: &str = r#"
@prefix sh: <http://www.w3.org/ns/shacl#> .
@prefix ex: <http://example.org/ns#> .
ex:PersonShape a sh:NodeShape ; sh:targetClass ex:Person .
"#;

    fn manifest(includes: &[&str], entries: &str) -> String {
        let includes = includes
            .iter()
            .map(|i| format!("<> mf:include <{i}> ."))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            r#"
@prefix mf: <http://www.w3.org/2001/sw/DataAccess/tests/test-manifest#> .
@prefix sht: <http://www.w3.org/ns/shacl-test#> .
@prefix sh: <http://www.w3.org/ns/shacl#> .

<> a mf:Manifest ; mf:entries ( {entries} ) .
{includes}
"#
        )
    }

    const CASE: &str = r#"
<#t1> mf:action [ sht:shapesGraph <shapes.ttl> ; sht:dataGraph <shapes.ttl> ] ;
    mf:result [ sh:conforms true ] .
"#;

    #[test]
    fn empty_manifest_is_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("test-empty.ttl");
        fs::write(&root, manifest(&[], "")).unwrap();

        let tree = resolve(&root).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.case_count(), 0);
    }

    #[test]
    fn entries_collect_cases() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("shapes.ttl"), SHAPES).unwrap();
        let root = dir.path().join("test-one.ttl");
        fs::write(&root, manifest(&[], "<#t1>") + CASE).unwrap();

        let tree = resolve(&root).unwrap();
        assert_eq!(tree.case_count(), 1);
        assert!(tree.cases()[0].id.ends_with("test-one.ttl#t1"));
    }

    #[test]
    fn mutual_includes_terminate() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("test-a.ttl");
        let b = dir.path().join("test-b.ttl");
        fs::write(&a, manifest(&["test-b.ttl"], "")).unwrap();
        fs::write(&b, manifest(&["test-a.ttl"], "")).unwrap();

        let tree = resolve(&a).unwrap();
        assert_eq!(tree.items.len(), 1);
        let ManifestItem::SubManifest(sub) = &tree.items[0] else {
            unreachable!("expected sub-manifest, got {:?}", tree.items[0]);
        };
        assert!(matches!(
            &sub.items[..],
            [ManifestItem::Revisited(path)] if *path == fs::canonicalize(&a).unwrap()
        ));
    }

    #[test]
    fn diamond_include_expands_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("shapes.ttl"), SHAPES).unwrap();
        let root = dir.path().join("test-root.ttl");
        fs::write(&root, manifest(&["test-left.ttl", "test-right.ttl"], "")).unwrap();
        fs::write(dir.path().join("test-left.ttl"), manifest(&["test-shared.ttl"], "")).unwrap();
        fs::write(dir.path().join("test-right.ttl"), manifest(&["test-shared.ttl"], "")).unwrap();
        let shared = dir.path().join("test-shared.ttl");
        fs::write(&shared, manifest(&[], "<#t1>") + CASE).unwrap();
        let shared = fs::canonicalize(&shared).unwrap();

        let tree = resolve(&root).unwrap();
        let branches: Vec<&ManifestTree> = tree
            .items
            .iter()
            .map(|item| match item {
                ManifestItem::SubManifest(sub) => sub,
                other => unreachable!("expected sub-manifest, got {other:?}"),
            })
            .collect();
        assert_eq!(branches.len(), 2);

        let expanded = branches
            .iter()
            .filter(|b| matches!(&b.items[..], [ManifestItem::SubManifest(s)] if s.path == shared))
            .count();
        let revisited = branches
            .iter()
            .filter(|b| matches!(&b.items[..], [ManifestItem::Revisited(p)] if *p == shared))
            .count();
        assert_eq!((expanded, revisited), (1, 1));
        assert_eq!(tree.case_count(), 1);
    }

    #[test]
    fn self_include_is_revisited() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("test-self.ttl");
        fs::write(&root, manifest(&["test-self.ttl"], "")).unwrap();

        let tree = resolve(&root).unwrap();
        assert!(matches!(&tree.items[..], [ManifestItem::Revisited(_)]));
    }

    #[test]
    fn missing_include_is_scoped_to_its_branch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("shapes.ttl"), SHAPES).unwrap();
        let root = dir.path().join("test-missing.ttl");
        fs::write(&root, manifest(&["absent/test-gone.ttl"], "<#t1>") + CASE).unwrap();

        let tree = resolve(&root).unwrap();
        assert_eq!(tree.items.len(), 2);
        assert!(matches!(
            &tree.items[0],
            ManifestItem::Error(CollectError {
                error: ManifestError::MissingResource { .. },
                ..
            })
        ));
        assert_eq!(tree.case_count(), 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve(&dir.path().join("test-nothing.ttl")).is_err());
    }
}
