//! Filesystem discovery of route and controller modules.
//!
//! # Data Flow
//! ```text
//! Options.routes      → loader.rs (list *.toml) → route_file.rs (parse)
//!                     → toolbox.rs (resolve middleware/plugin names) → RouteModule
//! Options.controllers → loader.rs (list *.rs)   → catalog.rs (factory by stem)
//!                     → ControllerModule
//! ```
//!
//! # Design Decisions
//! - Route tables are data; behavior (middleware, plugins, controllers) is
//!   compiled in and looked up by name
//! - Module names are file stems so a `posts.toml` route table pairs with a
//!   `posts.rs` controller
//! - Any unknown name is a bootstrap error, never a silent skip

pub mod catalog;
pub mod loader;
pub mod route_file;
pub mod toolbox;

pub use catalog::ControllerCatalog;
pub use loader::{discover, load_controllers, load_routes, read_route_files, ModuleFile};
pub use route_file::{RouteFile, RouteSpec};
pub use toolbox::Toolbox;
