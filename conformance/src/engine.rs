//! External validator process with a pyshacl-compatible command line.
//!
//! The request graphs are written as N-Triples into a scratch directory and
//! passed by path. The process prints its report as Turtle on stdout and
//! exits 0 when the data conforms, 1 when it does not; any other status is an
//! engine failure.

use std::fs;
use std::path::Path;
use std::process::Command;

use rdftest_vocab::iris;
use sophia_inmem::graph::FastGraph;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::dispatch::{EngineOutput, ValidationEngine, ValidationRequest};
use crate::error::EngineError;
use crate::graph::serialize::{to_text, SerializationFormat};
use crate::graph::store::{parse_str, RdfFormat};
use crate::graph::GraphNavigator;
use crate::params::{OptionMap, OptionValue};

/// Boolean options and the flag each one turns on.
const BOOLEAN_FLAGS: &[(&str, &str)] = &[
    ("advanced", "-a"),
    ("abort_on_first", "--abort"),
    ("allow_infos", "--allow-infos"),
    ("allow_warnings", "-w"),
    ("debug", "-d"),
    ("js", "-j"),
    ("meta_shacl", "-m"),
    ("iterate_rules", "-it"),
    ("do_owl_imports", "-im"),
];

/// Runs an external validator per request.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    /// Creates an engine that runs `program`, with `args` placed before the
    /// generated arguments.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Creates an engine from the `[engine]` config section.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    fn io_error(&self, source: std::io::Error) -> EngineError {
        EngineError::Io {
            engine: self.program.clone(),
            source,
        }
    }

    fn write_graph(&self, graph: &FastGraph, path: &Path) -> Result<(), EngineError> {
        let text = to_text(graph, SerializationFormat::NTriples)?;
        fs::write(path, text).map_err(|e| self.io_error(e))
    }
}

impl ValidationEngine for CommandEngine {
    fn name(&self) -> &str {
        &self.program
    }

    fn validate(&self, request: &ValidationRequest) -> Result<EngineOutput, EngineError> {
        let scratch = tempfile::tempdir().map_err(|e| self.io_error(e))?;
        let data = scratch.path().join("data.nt");
        let shapes = scratch.path().join("shapes.nt");
        self.write_graph(&request.data_graph, &data)?;
        self.write_graph(&request.shapes_graph, &shapes)?;

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg("-s")
            .arg(&shapes)
            .args(["-df", "nt", "-sf", "nt", "-f", "turtle"])
            .args(option_flags(&request.options))
            .arg(&data);
        debug!(command = ?command, "Running validator");

        let output = command.output().map_err(|e| self.io_error(e))?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        let code = output.status.code();
        if !matches!(code, Some(0 | 1)) {
            return Err(EngineError::Failed {
                engine: self.program.clone(),
                message: match code {
                    Some(code) => format!("exit status {code}: {}", stderr.trim()),
                    None => format!("terminated by signal: {}", stderr.trim()),
                },
            });
        }

        let report = match parse_str(&stdout, RdfFormat::Turtle, None) {
            Ok(graph) => Some(graph),
            Err(e) => {
                warn!(engine = %self.program, error = %e, "Validator output is not a Turtle graph");
                None
            }
        };
        let conforms = report
            .as_ref()
            .and_then(|graph| {
                let nav = GraphNavigator::new(graph);
                let root = nav.instance(iris::SH_VALIDATION_REPORT)?;
                nav.lit_obj_opt(&root, iris::SH_CONFORMS)?.as_bool()
            })
            .unwrap_or(code == Some(0));

        Ok(EngineOutput {
            conforms,
            report,
            log: stderr,
        })
    }
}

/// Renders `options` as validator flags. Options without a command-line
/// spelling are dropped with a warning.
#[must_use]
pub fn option_flags(options: &OptionMap) -> Vec<String> {
    let mut flags = Vec::new();
    for (name, value) in options.iter() {
        if let Some((_, flag)) = BOOLEAN_FLAGS.iter().find(|(n, _)| *n == name) {
            if value == &OptionValue::Bool(true) {
                flags.push((*flag).to_string());
            }
            continue;
        }
        match (name, value) {
            ("inference", OptionValue::Text(kind)) => {
                flags.extend(["-i".to_string(), kind.clone()]);
            }
            ("max_validation_depth", OptionValue::Integer(depth)) => {
                flags.extend(["--max-depth".to_string(), depth.to_string()]);
            }
            ("focus_nodes", OptionValue::References(ids)) if !ids.is_empty() => {
                flags.extend(["--focus".to_string(), ids.join(",")]);
            }
            ("use_shapes", OptionValue::References(ids)) if !ids.is_empty() => {
                flags.extend(["--shape".to_string(), ids.join(",")]);
            }
            _ => warn!(option = name, "Option has no validator flag, skipping"),
        }
    }
    flags
}
