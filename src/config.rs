//! Loading and interrogating the site configuration (mkdocs.yml)
//!
//! The configuration is kept as a generic [`serde_yaml::Value`] tree; only
//! the handful of keys relevant to dependency inference are interpreted.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::dig::{dig, strings};
use crate::error::{GetDepsError, Result};

/// Keys whose presence marks a document as an MkDocs configuration
pub const MARKER_KEYS: [&str; 4] = ["site_name", "theme", "plugins", "markdown_extensions"];

/// Themes bundled with mkdocs itself; never need a catalog entry
const BUILTIN_THEMES: [&str; 2] = ["mkdocs", "readthedocs"];

/// Plugins bundled with mkdocs itself
const BUILTIN_PLUGINS: [&str; 1] = ["search"];

/// Pick the configuration file path: an explicit one, else `mkdocs.yml`,
/// else `mkdocs.yaml`, else default to `mkdocs.yml` and let the read fail.
pub fn locate_config_file(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    for candidate in ["mkdocs.yml", "mkdocs.yaml"] {
        let path = PathBuf::from(candidate);
        if path.is_file() {
            return path;
        }
    }
    PathBuf::from("mkdocs.yml")
}

/// Read and parse the configuration file, requiring a mapping at the root
pub fn load_config(path: &Path) -> Result<Value> {
    let bytes = std::fs::read(path).map_err(|e| GetDepsError::ConfigReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_config(&bytes)
}

/// Parse configuration bytes, requiring a mapping at the root.
///
/// An empty or comment-only file parses to null and is treated as an empty
/// mapping; any other non-mapping root is invalid.
pub fn parse_config(bytes: &[u8]) -> Result<Value> {
    let cfg: Value = serde_yaml::from_slice(bytes)?;
    match cfg {
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        Value::Mapping(_) => Ok(cfg),
        other => Err(GetDepsError::InvalidConfiguration {
            found: type_name(&other).to_string(),
        }),
    }
}

/// Whether the document carries at least one of the marker keys
pub fn looks_like_config(cfg: &Value) -> bool {
    MARKER_KEYS.iter().any(|key| cfg.get(key).is_some())
}

/// The configured theme name, if any.
///
/// Prefers `theme.name`; when that path does not resolve, falls back to the
/// raw `theme` value. Only a non-empty string names a theme.
pub fn theme_name(cfg: &Value) -> Option<String> {
    let raw = match dig(cfg, "theme.name") {
        Some(value) => value,
        None => cfg.get("theme").cloned().unwrap_or(Value::Null),
    };
    match raw {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Requested theme names, with the bundled themes removed
pub fn wanted_themes(cfg: &Value) -> BTreeSet<String> {
    let mut themes = BTreeSet::new();
    if let Some(theme) = theme_name(cfg) {
        themes.insert(theme);
    }
    for builtin in BUILTIN_THEMES {
        themes.remove(builtin);
    }
    themes
}

/// Requested plugin names, with the bundled plugins removed
pub fn wanted_plugins(cfg: &Value) -> BTreeSet<String> {
    let mut plugins = names_at(cfg, "plugins");
    for builtin in BUILTIN_PLUGINS {
        plugins.remove(builtin);
    }
    plugins
}

/// Requested markdown extension names
pub fn wanted_extensions(cfg: &Value) -> BTreeSet<String> {
    names_at(cfg, "markdown_extensions")
}

fn names_at(cfg: &Value, key: &str) -> BTreeSet<String> {
    match dig(cfg, key) {
        Some(value) => strings(&value).into_iter().collect(),
        None => BTreeSet::new(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
