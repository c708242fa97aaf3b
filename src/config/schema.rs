//! Configuration schema definitions.
//!
//! `PartialOptions` is what callers and config files supply; every field is
//! optional. `Options` is the fully populated result after defaults are
//! merged in by [`resolve`].

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How request-time plugin failures are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Forward the failure to the host's error pathway, detail included.
    Development,
    /// Collapse the failure to a generic 500 response.
    #[default]
    Production,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Production => write!(f, "production"),
        }
    }
}

/// Caller-supplied options. Absent fields keep their defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PartialOptions {
    /// Directory holding route tables.
    pub routes: Option<PathBuf>,

    /// Directory holding controller sources.
    pub controllers: Option<PathBuf>,

    /// Plugin failure behavior.
    pub mode: Option<Mode>,

    /// Extension of route table files (without the dot).
    pub route_extension: Option<String>,

    /// Extension of controller files (without the dot).
    pub controller_extension: Option<String>,
}

/// Fully resolved options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Options {
    pub routes: PathBuf,
    pub controllers: PathBuf,
    pub mode: Mode,
    pub route_extension: String,
    pub controller_extension: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            routes: PathBuf::from("./routes"),
            controllers: PathBuf::from("./controllers"),
            mode: Mode::default(),
            route_extension: "toml".to_string(),
            controller_extension: "rs".to_string(),
        }
    }
}

/// Merge caller options over the defaults.
pub fn resolve(options: Option<PartialOptions>) -> Options {
    let defaults = Options::default();
    let Some(partial) = options else {
        return defaults;
    };

    Options {
        routes: partial.routes.unwrap_or(defaults.routes),
        controllers: partial.controllers.unwrap_or(defaults.controllers),
        mode: partial.mode.unwrap_or(defaults.mode),
        route_extension: partial.route_extension.unwrap_or(defaults.route_extension),
        controller_extension: partial
            .controller_extension
            .unwrap_or(defaults.controller_extension),
    }
}
