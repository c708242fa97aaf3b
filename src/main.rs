//! Switchboard command line.
//!
//! Inspects a project's route tables and controller directory without
//! starting a server:
//!
//! ```text
//! switchboard routes [--json]   print every route the tables declare
//! switchboard check             pair route tables with controller files
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use switchboard::config::{self, Options};
use switchboard::discovery::{discover, read_route_files, RouteFile};
use switchboard::observability::logging::{self, LogFormat};
use switchboard::routing::matcher::pair;
use switchboard::SwitchboardResult;

#[derive(Parser)]
#[command(name = "switchboard")]
#[command(about = "Inspect convention-based route and controller modules", long_about = None)]
struct Cli {
    /// Options file (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route table directory, overriding the options file.
    #[arg(long)]
    routes: Option<PathBuf>,

    /// Controller directory, overriding the options file.
    #[arg(long)]
    controllers: Option<PathBuf>,

    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the routes declared by every route table
    Routes {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Check that every route table has a controller file
    Check,
}

#[derive(Serialize)]
struct RouteRow<'a> {
    module: &'a str,
    method: &'a str,
    path: &'a str,
    action: &'a str,
    middleware: &'a [String],
    plugins: &'a [String],
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.log_format) {
        eprintln!("failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "switchboard failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> SwitchboardResult<()> {
    let mut options = match &cli.config {
        Some(path) => config::load_options(path)?,
        None => Options::default(),
    };
    if let Some(routes) = cli.routes {
        options.routes = routes;
    }
    if let Some(controllers) = cli.controllers {
        options.controllers = controllers;
    }

    match cli.command {
        Commands::Routes { json } => print_routes(&options, json),
        Commands::Check => check(&options),
    }
}

fn print_routes(options: &Options, json: bool) -> SwitchboardResult<()> {
    let files = read_route_files(&options.routes, &options.route_extension)?;
    let rows = route_rows(&files);

    if json {
        let text = serde_json::to_string_pretty(&rows).map_err(|e| switchboard::SwitchboardError::Config(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    for row in &rows {
        let mut line = format!("{:<8} {:<32} {}#{}", row.method, row.path, row.module, row.action);
        if !row.middleware.is_empty() {
            line.push_str(&format!("  middleware: {}", row.middleware.join(", ")));
        }
        if !row.plugins.is_empty() {
            line.push_str(&format!("  plugins: {}", row.plugins.join(", ")));
        }
        println!("{}", line);
    }
    Ok(())
}

fn route_rows(files: &[RouteFile]) -> Vec<RouteRow<'_>> {
    let mut rows = Vec::new();
    for file in files {
        for (method, specs) in &file.methods {
            for spec in specs {
                rows.push(RouteRow {
                    module: &file.origin,
                    method: method.as_str(),
                    path: &spec.path,
                    action: &spec.action,
                    middleware: spec.middleware.as_deref().unwrap_or_default(),
                    plugins: spec.plugins.as_deref().unwrap_or_default(),
                });
            }
        }
    }
    rows
}

fn check(options: &Options) -> SwitchboardResult<()> {
    let routes = discover(&options.routes, &options.route_extension)?;
    let controllers = discover(&options.controllers, &options.controller_extension)?;

    for (route, controller) in pair(routes, controllers)? {
        println!("{} -> {}", route.name, controller.name);
    }
    println!("all route tables have controllers");
    Ok(())
}
