//! Module discovery on disk.
//!
//! # Responsibilities
//! - List a directory and keep files with the configured extension
//! - Load route tables into route modules
//! - Resolve controller files against the controller catalog
//!
//! # Design Decisions
//! - Synchronous: discovery runs once at bootstrap before any traffic
//! - Directory listing order is kept, it is not sorted
//! - A missing directory is fatal and reported with its path

use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::catalog::ControllerCatalog;
use crate::discovery::route_file::RouteFile;
use crate::discovery::toolbox::Toolbox;
use crate::error::{SwitchboardError, SwitchboardResult};
use crate::http::controller::ControllerModule;
use crate::routing::matcher::Named;
use crate::routing::table::RouteModule;

/// A file found by [`discover`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFile {
    /// File name including the extension.
    pub name: String,
    /// File name without the extension; the matching key.
    pub stem: String,
    pub path: PathBuf,
}

// Route tables and controllers live in files with different extensions, so
// the stem is what the two sides share. The full file name stays in messages.
impl Named for ModuleFile {
    fn name(&self) -> &str {
        &self.stem
    }

    fn origin(&self) -> &str {
        &self.name
    }
}

/// List the files in `dir` whose extension is `extension`.
pub fn discover(dir: &Path, extension: &str) -> SwitchboardResult<Vec<ModuleFile>> {
    let io_error = |source| SwitchboardError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if entry.file_type().map_err(io_error)?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        files.push(ModuleFile { name, stem, path });
    }

    tracing::debug!(dir = %dir.display(), extension, count = files.len(), "Discovered modules");
    Ok(files)
}

/// Read every route table in `dir` without resolving middleware or plugins.
pub fn read_route_files(dir: &Path, extension: &str) -> SwitchboardResult<Vec<RouteFile>> {
    discover(dir, extension)?
        .iter()
        .map(RouteFile::read)
        .collect()
}

/// Load every route table in `dir` as a route module.
pub fn load_routes(dir: &Path, extension: &str, toolbox: &Toolbox) -> SwitchboardResult<Vec<RouteModule>> {
    read_route_files(dir, extension)?
        .into_iter()
        .map(|file| file.into_module(toolbox))
        .collect()
}

/// Load every controller file in `dir`, taking its factory from `catalog`.
pub fn load_controllers(
    dir: &Path,
    extension: &str,
    catalog: &ControllerCatalog,
) -> SwitchboardResult<Vec<ControllerModule>> {
    discover(dir, extension)?
        .into_iter()
        .map(|file| {
            catalog
                .get(&file.stem)
                .ok_or(SwitchboardError::UnregisteredController {
                    file: file.name,
                    name: file.stem,
                })
        })
        .collect()
}
