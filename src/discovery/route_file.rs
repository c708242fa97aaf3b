//! Route table files.
//!
//! A route table is a TOML file whose top-level keys are lowercase HTTP
//! methods, each holding an array of route specs:
//!
//! ```toml
//! [[get]]
//! path = "/posts/:id"
//! action = "find_post"
//! middleware = ["auth"]
//!
//! [[post]]
//! path = "/post"
//! action = "create"
//! plugins = ["audit"]
//! ```
//!
//! Middleware and plugins are referenced by name and resolved through a
//! [`Toolbox`] when the file becomes a [`RouteModule`].

use std::fs;

use axum::http::Method;
use serde::{Deserialize, Serialize};

use crate::discovery::loader::ModuleFile;
use crate::discovery::toolbox::Toolbox;
use crate::error::{SwitchboardError, SwitchboardResult};
use crate::routing::table::{parse_method, RouteModule};

/// One route as written in a route table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouteSpec {
    pub path: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middleware: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<String>>,
}

/// A parsed, unresolved route table.
#[derive(Debug, Clone)]
pub struct RouteFile {
    /// Matching key (file stem).
    pub name: String,
    /// File name, used in messages.
    pub origin: String,
    pub methods: Vec<(Method, Vec<RouteSpec>)>,
}

impl RouteFile {
    /// Read and parse a discovered file.
    pub fn read(file: &ModuleFile) -> SwitchboardResult<Self> {
        let content = fs::read_to_string(&file.path).map_err(|source| SwitchboardError::Io {
            path: file.path.clone(),
            source,
        })?;
        Self::parse(&file.stem, &file.name, &content)
    }

    /// Parse route table text.
    pub fn parse(name: &str, origin: &str, content: &str) -> SwitchboardResult<Self> {
        let table_error = |message: String| SwitchboardError::RouteTable {
            file: origin.to_string(),
            message,
        };

        let table: toml::Table = content.parse().map_err(|e: toml::de::Error| table_error(e.to_string()))?;

        let mut methods = Vec::with_capacity(table.len());
        for (key, value) in table {
            let method = parse_method(&key).ok_or_else(|| SwitchboardError::UnsupportedMethod {
                route: origin.to_string(),
                method: key.clone(),
            })?;
            let specs: Vec<RouteSpec> = value
                .try_into()
                .map_err(|e: toml::de::Error| table_error(format!("[{}]: {}", key, e)))?;
            methods.push((method, specs));
        }

        Ok(Self {
            name: name.to_string(),
            origin: origin.to_string(),
            methods,
        })
    }

    /// Number of route specs across all methods.
    pub fn entry_count(&self) -> usize {
        self.methods.iter().map(|(_, specs)| specs.len()).sum()
    }

    /// Resolve middleware and plugin names and build the route module.
    pub fn into_module(self, toolbox: &Toolbox) -> SwitchboardResult<RouteModule> {
        let mut module = RouteModule::new(self.name).with_origin(self.origin);
        for (method, specs) in self.methods {
            for spec in specs {
                let entry = toolbox.resolve(module.origin(), spec)?;
                module = module.on(method.clone(), entry);
            }
        }
        Ok(module)
    }
}
