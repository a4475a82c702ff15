//! Manifest discovery by file-name convention.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::DiscoveryConfig;

/// Returns true if `path` names a manifest: the file name starts with the
/// configured prefix and the extension is one of the configured set.
/// Contents are not inspected.
#[must_use]
pub fn is_manifest_file(path: &Path, config: &DiscoveryConfig) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    name.starts_with(&config.prefix)
        && config
            .extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
}

/// Lists the manifests under `root`, sorted by path.
///
/// A file passed directly is returned as is, whatever its name.
///
/// # Errors
///
/// Returns an error if a directory cannot be walked.
pub fn discover(root: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>, walkdir::Error> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_manifest_file(entry.path(), config) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}
