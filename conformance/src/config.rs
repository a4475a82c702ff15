//! Harness configuration, read from `rdftest.toml`.
//!
//! ```toml
//! [discovery]
//! prefix = "test"
//! extensions = ["ttl", "json", "json-ld", "jsonld"]
//!
//! [diagnostics]
//! format = "turtle"
//!
//! [engine]
//! program = "pyshacl"
//! args = []
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::graph::SerializationFormat;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "rdftest.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Which files are manifests.
    pub discovery: DiscoveryConfig,
    /// How mismatches are rendered.
    pub diagnostics: DiagnosticsConfig,
    /// Which validator runs the cases.
    pub engine: EngineConfig,
}

/// Manifest file naming convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Required file-name prefix.
    pub prefix: String,
    /// Accepted extensions, without the dot.
    pub extensions: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            prefix: "test".to_string(),
            extensions: ["ttl", "json", "json-ld", "jsonld"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Diagnostic rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Syntax of the report subgraphs in failure messages.
    pub format: SerializationFormat,
}

/// External validator command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Executable name or path.
    pub program: String,
    /// Arguments placed before the generated ones.
    pub args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: "pyshacl".to_string(),
            args: Vec::new(),
        }
    }
}

impl HarnessConfig {
    /// Loads the configuration.
    ///
    /// With `Some(path)` the file must exist. With `None`,
    /// [`DEFAULT_CONFIG_FILE`] is read if present, else defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    debug!("No {DEFAULT_CONFIG_FILE}, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}
