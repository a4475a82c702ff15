//! End-to-end runs of the fixture suite against an in-process engine.

mod common;

use std::path::PathBuf;

use common::{fixture, PersonEngine};
use rdftest_conformance::manifest::resolve;
use rdftest_conformance::{
    CaseError, EngineError, HarnessConfig, ParamError, Runner, Severity, Verdict,
};

fn runner() -> Runner<PersonEngine> {
    Runner::new(PersonEngine::default(), HarnessConfig::default())
}

#[test]
fn conforming_case_passes() {
    let runner = runner();
    let tree = resolve(&fixture("test-basic.ttl")).unwrap();
    let verdict = runner.execute(tree.cases()[0]).unwrap();
    assert_eq!(verdict, Verdict::Pass);
    assert_eq!(runner.engine().calls(), 1);
}

#[test]
fn expected_violation_passes() {
    let runner = runner();
    let tree = resolve(&fixture("test-basic.ttl")).unwrap();
    assert!(runner.execute(tree.cases()[1]).unwrap().is_pass());
}

#[test]
fn mismatch_fails_with_actual_report() {
    let runner = runner();
    let tree = resolve(&fixture("test-basic.ttl")).unwrap();
    let Verdict::Fail(diagnostic) = runner.execute(tree.cases()[2]).unwrap() else {
        unreachable!("invalid data cannot conform");
    };
    assert!(diagnostic.expected_conforms);
    assert!(!diagnostic.actual_conforms);
    assert!(diagnostic.actual.contains("http://example.org/ns#bob"));
    assert!(!diagnostic.expected.is_empty());

    let text = diagnostic.to_string();
    assert!(text.contains("Actual validation report:"));
    assert!(text.contains("Expected validation report:"));
}

#[test]
fn focus_nodes_reach_the_engine_in_order() {
    let runner = runner();
    let tree = resolve(&fixture("test-params.ttl")).unwrap();
    let focus = tree
        .cases()
        .into_iter()
        .find(|c| c.id.ends_with("#focus"))
        .unwrap();
    runner.execute(focus).unwrap();

    let seen = runner.engine().seen_options();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].get_references("focus_nodes").unwrap(),
        ["http://example.org/ns#alice", "http://example.org/ns#bob"]
    );
}

#[test]
fn unknown_parameter_fails_before_dispatch() {
    let runner = runner();
    let tree = resolve(&fixture("test-params.ttl")).unwrap();
    let unknown = tree
        .cases()
        .into_iter()
        .find(|c| c.id.ends_with("#unknown"))
        .unwrap();

    let err = runner.execute(unknown).unwrap_err();
    assert!(matches!(
        err,
        CaseError::Param(ParamError::Unknown { ref parameter, .. }) if parameter == "not_an_option"
    ));
    assert!(!err.is_internal());
    assert_eq!(runner.engine().calls(), 0);
}

#[test]
fn withheld_report_is_an_internal_error() {
    let runner = Runner::new(PersonEngine::withholding_report(), HarnessConfig::default());
    let tree = resolve(&fixture("test-basic.ttl")).unwrap();
    let err = runner.execute(tree.cases()[0]).unwrap_err();
    assert!(matches!(
        err,
        CaseError::Engine(EngineError::ContractViolation { .. })
    ));

    let result = runner.run_case(tree.cases()[0]);
    assert_eq!(result.severity, Severity::Error);
}

#[test]
fn params_manifest_results() {
    let report = runner()
        .run_paths(&[fixture("test-params.ttl")])
        .unwrap();
    let severity_of = |suffix: &str| {
        report
            .results
            .iter()
            .find(|r| r.test.ends_with(suffix))
            .map(|r| r.severity)
            .unwrap()
    };
    assert_eq!(severity_of("#focus"), Severity::Pass);
    assert_eq!(severity_of("#scalars"), Severity::Pass);
    assert_eq!(severity_of("#unknown"), Severity::Failure);
    assert_eq!(severity_of("#duplicate"), Severity::Failure);
}

#[test]
fn whole_fixture_directory() {
    let runner = runner();
    let report = runner.run_paths(&[fixture("")]).unwrap();

    // basic (2), broken sibling (1), nested (direct, via include, via JSON-LD
    // include), JSON-LD case (1), params (2)
    assert_eq!(report.pass_count(), 9, "{:#?}", report.results);
    // wrong expectation, broken case, missing include, unknown and duplicate params
    assert_eq!(report.failure_count(), 5, "{:#?}", report.results);
    // each cycle manifest revisits the other
    assert_eq!(report.warning_count(), 2, "{:#?}", report.results);
    assert_eq!(report.error_count(), 0);
    assert!(!report.all_passed());

    let failure = report
        .results
        .iter()
        .find(|r| r.test.ends_with("#wrong-expectation"))
        .unwrap();
    assert!(failure.details.iter().any(|l| l == "SHACL validation failed."));
}

#[test]
fn missing_directory_is_an_error() {
    assert!(runner()
        .run_paths(&[PathBuf::from("/definitely/not/a/suite")])
        .is_err());
}
