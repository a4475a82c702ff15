//! Shared fixtures for the integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rdftest_conformance::graph::store::{parse_str, RdfFormat};
use rdftest_conformance::graph::GraphNavigator;
use rdftest_conformance::{
    EngineError, EngineOutput, OptionMap, ValidationEngine, ValidationRequest,
};

pub const PERSON: &str = "http://example.org/ns#Person";
pub const NAME: &str = "http://example.org/ns#name";

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// In-process engine: the data conforms iff every `ex:Person` has an `ex:name`.
#[derive(Default)]
pub struct PersonEngine {
    calls: AtomicUsize,
    options: Mutex<Vec<OptionMap>>,
    withhold_report: bool,
}

impl PersonEngine {
    /// An engine that never returns a report graph.
    pub fn withholding_report() -> Self {
        Self {
            withhold_report: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_options(&self) -> Vec<OptionMap> {
        self.options.lock().unwrap().clone()
    }
}

impl ValidationEngine for PersonEngine {
    fn name(&self) -> &str {
        "person-engine"
    }

    fn validate(&self, request: &ValidationRequest) -> Result<EngineOutput, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.options.lock().unwrap().push(request.options.clone());

        let nav = GraphNavigator::new(&request.data_graph);
        let unnamed: Vec<_> = nav
            .instances(PERSON)
            .into_iter()
            .filter(|person| nav.lit_obj_opt(person, NAME).is_none())
            .collect();

        let mut report = String::from(
            "@prefix sh: <http://www.w3.org/ns/shacl#> .\n\
             @prefix ex: <http://example.org/ns#> .\n\
             [] a sh:ValidationReport ;\n",
        );
        report.push_str(&format!("    sh:conforms {}", unnamed.is_empty()));
        for person in &unnamed {
            report.push_str(&format!(
                " ;\n    sh:result [ a sh:ValidationResult ; sh:focusNode {person} ; \
                 sh:resultPath ex:name ; sh:resultMessage \"Less than 1 values\" ]"
            ));
        }
        report.push_str(" .\n");

        let report = parse_str(&report, RdfFormat::Turtle, None)?;
        Ok(EngineOutput {
            conforms: unnamed.is_empty(),
            report: (!self.withhold_report).then_some(report),
            log: String::new(),
        })
    }
}
