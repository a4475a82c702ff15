//! Result comparison and mismatch diagnostics.

use std::fmt;

use rdftest_vocab::iris;

use crate::case::TestCase;
use crate::dispatch::ValidationOutcome;
use crate::error::GraphError;
use crate::graph::serialize::{to_text, SerializationFormat};
use crate::graph::GraphNavigator;

/// Outcome of comparing one validation run with its expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Actual and expected conformance agree.
    Pass,
    /// They disagree.
    Fail(Diagnostic),
}

impl Verdict {
    /// Returns true for [`Verdict::Pass`].
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Both sides of a conformance mismatch, serialized for reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Conformance the manifest expected.
    pub expected_conforms: bool,
    /// Conformance the engine reported.
    pub actual_conforms: bool,
    /// The engine's validation report.
    pub actual: String,
    /// The manifest's expected result.
    pub expected: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SHACL validation failed.")?;
        writeln!(f, "Actual validation report:")?;
        writeln!(f, "{}", self.actual.trim_end())?;
        writeln!(f, "Expected validation report:")?;
        write!(f, "{}", self.expected.trim_end())
    }
}

/// Compares `outcome` with what `case` expects.
///
/// On mismatch the actual side is the description of the
/// `sh:ValidationReport` node in the engine's report, or the whole report
/// graph if it has no such node. The expected side is the description of the
/// case's `mf:result` node. Neither side is truncated.
///
/// # Errors
///
/// Returns an error if either side cannot be serialized.
pub fn compare(
    outcome: &ValidationOutcome,
    case: &TestCase,
    format: SerializationFormat,
) -> Result<Verdict, GraphError> {
    if outcome.conforms == case.expected.conforms {
        return Ok(Verdict::Pass);
    }

    let report_nav = GraphNavigator::new(&outcome.report);
    let actual = match report_nav.instance(iris::SH_VALIDATION_REPORT) {
        Some(root) => to_text(&report_nav.subgraph(&root)?, format)?,
        None => to_text(&outcome.report, format)?,
    };
    let expected = to_text(&case.expected_report()?, format)?;

    Ok(Verdict::Fail(Diagnostic {
        expected_conforms: case.expected.conforms,
        actual_conforms: outcome.conforms,
        actual,
        expected,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::graph::store::{parse_str, RdfFormat};
    use crate::graph::Node;
    use sophia_api::term::IriRef;
    use sophia_inmem::graph::FastGraph;
    use std::path::Path;
    use std::sync::Arc;

    const BASE: &str = "file:///suite/test-compare.ttl";

    const MANIFEST: &str = r#"
@prefix mf: <http://www.w3.org/2001/sw/DataAccess/tests/test-manifest#> .
@prefix sht: <http://www.w3.org/ns/shacl-test#> .
@prefix sh: <http://www.w3.org/ns/shacl#> .

<#t1> mf:action [ sht:shapesGraph <shapes.ttl> ; sht:dataGraph <data.ttl> ] ;
    mf:result [ a sh:ValidationReport ; sh:conforms true ] .
"#;

    const VIOLATION: &str = r#"
@prefix sh: <http://www.w3.org/ns/shacl#> .
@prefix ex: <http://example.org/ns#> .

[] a sh:ValidationReport ;
    sh:conforms false ;
    sh:result [
        a sh:ValidationResult ;
        sh:focusNode ex:bob ;
        sh:resultPath ex:name ;
        sh:resultMessage "Less than 1 values on ex:bob->ex:name"
    ] .

ex:unrelated ex:p ex:o .
"#;

    fn case() -> TestCase {
        let graph = Arc::new(parse_str(MANIFEST, RdfFormat::Turtle, Some(BASE)).unwrap());
        let node = Node::from_term(IriRef::new_unchecked(format!("{BASE}#t1"))).unwrap();
        TestCase::collect(&graph, node, Path::new("/suite/test-compare.ttl")).unwrap()
    }

    fn outcome(conforms: bool, report: &str) -> ValidationOutcome {
        ValidationOutcome {
            conforms,
            report: parse_str(report, RdfFormat::Turtle, None).unwrap(),
            log: String::new(),
        }
    }

    #[test]
    fn equal_conformance_passes() {
        let verdict = compare(
            &outcome(true, "@prefix sh: <http://www.w3.org/ns/shacl#> . [] a sh:ValidationReport ; sh:conforms true ."),
            &case(),
            SerializationFormat::Turtle,
        )
        .unwrap();
        assert_eq!(verdict, Verdict::Pass);
    }

    #[test]
    fn mismatch_carries_both_reports() {
        let verdict = compare(
            &outcome(false, VIOLATION),
            &case(),
            SerializationFormat::NTriples,
        )
        .unwrap();
        let Verdict::Fail(diagnostic) = verdict else {
            unreachable!("conformance differs");
        };
        assert!(diagnostic.expected_conforms);
        assert!(!diagnostic.actual_conforms);
        assert!(diagnostic.actual.contains("Less than 1 values"));
        assert!(!diagnostic.actual.contains("unrelated"));
        assert!(diagnostic.expected.contains("http://www.w3.org/ns/shacl#conforms"));

        let text = diagnostic.to_string();
        let actual_at = text.find("Actual validation report:").unwrap();
        let expected_at = text.find("Expected validation report:").unwrap();
        assert!(text.starts_with("SHACL validation failed."));
        assert!(actual_at < expected_at);
        assert!(text[actual_at..expected_at].contains("focusNode"));
    }

    #[test]
    fn report_without_root_is_used_whole() {
        let mut outcome = outcome(false, "<http://example.org/s> <http://example.org/p> <http://example.org/o> .");
        let verdict = compare(&outcome, &case(), SerializationFormat::NTriples).unwrap();
        let Verdict::Fail(diagnostic) = verdict else {
            unreachable!("conformance differs");
        };
        assert!(diagnostic.actual.contains("http://example.org/s"));

        outcome.report = FastGraph::new();
        let verdict = compare(&outcome, &case(), SerializationFormat::NTriples).unwrap();
        assert!(!verdict.is_pass());
    }
}
