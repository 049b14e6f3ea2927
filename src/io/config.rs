//! Generator configuration loading from JSON files

use crate::io::error::{Result, StreamError};
use crate::stream::generator::GeneratorConfig;
use std::path::Path;

/// Load a generator configuration from a JSON file
///
/// Optional fields (`max_catch_per_chunk`, `sentinel`, `seed`, `rules`,
/// `max_shuffle_attempts`) fall back to their defaults when omitted.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid
/// configuration document.
pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| StreamError::FileSystem {
        path: path.to_path_buf(),
        operation: "read",
        source,
    })?;

    serde_json::from_str(&text).map_err(|err| StreamError::ConfigFile {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}
