//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

/// mkdocs-get-deps - dependency inference for MkDocs sites
#[derive(Parser, Debug)]
#[command(
    name = "mkdocs-get-deps",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Show required PyPI packages inferred from plugins in mkdocs.yml",
    long_about = "Reads the site configuration, matches its theme, plugins and markdown \
                  extensions against the MkDocs catalog, and prints the PyPI packages \
                  needed to build the site, one per line.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  mkdocs-get-deps\n    \
                  mkdocs-get-deps -f docs/mkdocs.yml\n    \
                  mkdocs-get-deps -p ./projects.yaml\n\n\
                  \x1b[1m\x1b[32mCatalog:\x1b[0m\n    \
                  https://github.com/mkdocs/catalog"
)]
pub struct Cli {
    /// Path to mkdocs.yml (defaults to mkdocs.yml or mkdocs.yaml in the current directory)
    #[arg(long = "config-file", short = 'f', value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// URL or local path of the registry file that declares all known MkDocs-related projects
    #[arg(long = "projects-file", short = 'p', value_name = "FILE_OR_URL")]
    pub projects_file: Option<String>,

    /// Bypass the on-disk catalog cache
    #[arg(long)]
    pub no_cache: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
