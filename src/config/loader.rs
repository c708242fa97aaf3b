//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::{resolve, Options, PartialOptions};
use crate::config::validation::validate_options;
use crate::error::{SwitchboardError, SwitchboardResult};

/// Load a TOML options file, merge it over the defaults and validate.
pub fn load_options(path: &Path) -> SwitchboardResult<Options> {
    let content = fs::read_to_string(path).map_err(|source| SwitchboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_options(&content)
}

/// Parse options from TOML text.
pub fn parse_options(content: &str) -> SwitchboardResult<Options> {
    let partial: PartialOptions =
        toml::from_str(content).map_err(|e| SwitchboardError::Config(e.to_string()))?;
    let options = resolve(Some(partial));

    validate_options(&options).map_err(|errors| {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        SwitchboardError::Config(joined)
    })?;

    Ok(options)
}
