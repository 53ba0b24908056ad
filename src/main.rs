//! mkdocs-get-deps - dependency inference for MkDocs sites
//!
//! Infers the PyPI packages required to build a documentation site from its
//! mkdocs.yml, using the MkDocs catalog as a reverse mapping from theme,
//! plugin and markdown extension names to installable packages.

use clap::Parser;

mod cache;
mod catalog;
mod cli;
mod config;
mod dig;
mod error;
mod registry;
mod resolver;
mod ui;

use cli::Cli;
use registry::{LocalRegistry, PythonEnvScanner};

fn main() {
    let cli = Cli::parse();

    let mut registry = LocalRegistry::new(Box::new(PythonEnvScanner::discover()));
    let result = resolver::get_deps(
        cli.projects_file.as_deref(),
        cli.config_file.as_deref(),
        cli.no_cache,
        &mut registry,
    );

    match result {
        Ok(resolution) => {
            ui::emit_diagnostics(&resolution.diagnostics, cli.verbose);
            for package in &resolution.packages {
                println!("{package}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
