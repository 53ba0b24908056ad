//! Dependency resolution driver
//!
//! Loads the site configuration and the catalog, extracts the wanted
//! capability names, matches them against the catalog, consults the local
//! registry for leftovers, and returns the sorted package list together
//! with the diagnostics gathered along the way. The resolution core does
//! no I/O of its own.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use serde_yaml::Value;

use crate::cache;
use crate::catalog::{Catalog, CapabilityKind};
use crate::config;
use crate::dig::dig;
use crate::error::{GetDepsError, Result};
use crate::registry::{self, LocalRegistry};

/// The published MkDocs catalog
pub const DEFAULT_PROJECTS_FILE: &str =
    "https://raw.githubusercontent.com/mkdocs/catalog/main/projects.yaml";

/// How long a downloaded catalog stays fresh
pub const CATALOG_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24);

/// Diagnostic severity, in increasing order of noise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// A non-fatal finding surfaced to the user on stderr
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn debug(message: String) -> Self {
        Self {
            severity: Severity::Debug,
            message,
        }
    }

    pub fn info(message: String) -> Self {
        Self {
            severity: Severity::Info,
            message,
        }
    }

    pub fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// The capability names still wanted for one kind
#[derive(Debug, Clone)]
pub struct WantedSet {
    pub kind: CapabilityKind,
    pub names: BTreeSet<String>,
}

/// Outcome of a resolution: the install targets plus everything worth
/// telling the user
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Sorted, deduplicated pip install targets
    pub packages: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve a parsed configuration against a parsed catalog.
///
/// `config_name` is only used in the not-a-config warning. Pure apart from
/// the lazily-populated `registry` lookups.
pub fn resolve(
    cfg: &Value,
    catalog: &Catalog,
    registry: &mut LocalRegistry,
    config_name: &str,
) -> Resolution {
    let mut packages = BTreeSet::new();
    let mut diagnostics = Vec::new();

    if config::looks_like_config(cfg) {
        // theme.locale present with any value other than "en" pulls in the
        // i18n extra
        match dig(cfg, "theme.locale") {
            Some(Value::String(locale)) if locale == "en" => packages.insert("mkdocs".to_string()),
            Some(_) => packages.insert("mkdocs[i18n]".to_string()),
            None => packages.insert("mkdocs".to_string()),
        };
    } else {
        diagnostics.push(Diagnostic::warning(format!(
            "The file '{config_name}' doesn't seem to be a mkdocs.yml config file"
        )));
    }

    let theme = config::theme_name(cfg);

    let mut wanted = [
        WantedSet {
            kind: CapabilityKind::Theme,
            names: config::wanted_themes(cfg),
        },
        WantedSet {
            kind: CapabilityKind::Plugin,
            names: config::wanted_plugins(cfg),
        },
        WantedSet {
            kind: CapabilityKind::MarkdownExtension,
            names: config::wanted_extensions(cfg),
        },
    ];
    for slot in &wanted {
        diagnostics.push(Diagnostic::debug(format!(
            "Wanted {}s: {:?}",
            slot.kind.label(),
            slot.names.iter().collect::<Vec<_>>()
        )));
    }

    catalog.resolve(
        cfg,
        theme.as_deref(),
        &mut wanted,
        &mut packages,
        &mut diagnostics,
    );
    registry::unmatched_diagnostics(registry, &wanted, &mut diagnostics);

    Resolution {
        packages: packages.into_iter().collect(),
        diagnostics,
    }
}

/// Obtain the catalog content from a path or URL, going through the cache
/// for HTTP(S) locations
fn catalog_bytes(
    location: &str,
    no_cache: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<u8>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        if no_cache {
            cache::download(location)
        } else {
            cache::download_and_cache_url(location, CATALOG_MAX_AGE, diagnostics)
        }
    } else {
        std::fs::read(location).map_err(|e| GetDepsError::CatalogReadFailed {
            path: location.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Infer the packages required to build the site described by `config_file`.
///
/// `projects_file` may be a local path or an HTTP(S) URL; it defaults to the
/// published catalog, fetched through the on-disk cache.
pub fn get_deps(
    projects_file: Option<&str>,
    config_file: Option<&Path>,
    no_cache: bool,
    registry: &mut LocalRegistry,
) -> Result<Resolution> {
    let config_path = config::locate_config_file(config_file);
    let mut diagnostics = vec![Diagnostic::debug(format!(
        "Loading configuration file: {}",
        config_path.display()
    ))];
    let cfg = config::load_config(&config_path)?;

    let location = projects_file.unwrap_or(DEFAULT_PROJECTS_FILE);
    let bytes = catalog_bytes(location, no_cache, &mut diagnostics)?;
    let catalog = Catalog::from_yaml(&bytes)?;

    let mut resolution = resolve(
        &cfg,
        &catalog,
        registry,
        &config_path.display().to_string(),
    );
    let mut all = diagnostics;
    all.append(&mut resolution.diagnostics);
    resolution.diagnostics = all;
    Ok(resolution)
}
