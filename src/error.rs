//! Error types and handling for mkdocs-get-deps
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for dependency resolution
#[derive(Error, Diagnostic, Debug)]
pub enum GetDepsError {
    #[error("The configuration is invalid. Expected a key-value mapping but received {found}")]
    #[diagnostic(
        code(mkdocs_get_deps::config::invalid),
        help("The top level of mkdocs.yml must be a mapping, e.g. 'site_name: My Docs'")
    )]
    InvalidConfiguration { found: String },

    #[error("Failed to read configuration file '{path}': {reason}")]
    #[diagnostic(
        code(mkdocs_get_deps::config::read_failed),
        help("Check that the path exists, or pass one explicitly with --config-file")
    )]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse YAML: {reason}")]
    #[diagnostic(code(mkdocs_get_deps::config::parse_failed))]
    ConfigParseFailed { reason: String },

    #[error("Failed to read projects file '{path}': {reason}")]
    #[diagnostic(
        code(mkdocs_get_deps::catalog::read_failed),
        help("Check that the path exists, or pass one explicitly with --projects-file")
    )]
    CatalogReadFailed { path: String, reason: String },

    #[error("Failed to parse projects file: {reason}")]
    #[diagnostic(
        code(mkdocs_get_deps::catalog::parse_failed),
        help("The projects file must be YAML shaped as 'projects: [...]'")
    )]
    CatalogParseFailed { reason: String },

    #[error("Failed to download '{url}': {reason}")]
    #[diagnostic(
        code(mkdocs_get_deps::download::failed),
        help("Check network connectivity, or point --projects-file at a local copy")
    )]
    DownloadFailed { url: String, reason: String },

    #[error("Cache operation failed: {message}")]
    #[diagnostic(code(mkdocs_get_deps::cache::operation_failed))]
    CacheOperationFailed { message: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(mkdocs_get_deps::io::error))]
    Io { message: String },
}

/// Result type alias using [`GetDepsError`]
pub type Result<T> = std::result::Result<T, GetDepsError>;

impl From<std::io::Error> for GetDepsError {
    fn from(err: std::io::Error) -> Self {
        GetDepsError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for GetDepsError {
    fn from(err: serde_yaml::Error) -> Self {
        GetDepsError::ConfigParseFailed {
            reason: err.to_string(),
        }
    }
}
