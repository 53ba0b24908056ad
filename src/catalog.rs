//! The MkDocs catalog: known projects and how to install them
//!
//! The catalog is a YAML document shaped as `projects: [...]` where each
//! project declares which themes, plugins, or markdown extensions it
//! provides, and either a PyPI package name or a GitHub repository to
//! install it from.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use serde_yaml::Value;

use crate::dig::dig;
use crate::error::{GetDepsError, Result};
use crate::resolver::{Diagnostic, WantedSet};

/// The three kinds of capability a configuration can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    Theme,
    Plugin,
    MarkdownExtension,
}

impl CapabilityKind {
    /// Short name used in diagnostics, lowercase
    pub fn label(self) -> &'static str {
        match self {
            CapabilityKind::Theme => "theme",
            CapabilityKind::Plugin => "plugin",
            CapabilityKind::MarkdownExtension => "extension",
        }
    }

    /// Short name used in diagnostics, capitalized
    pub fn label_capitalized(self) -> &'static str {
        match self {
            CapabilityKind::Theme => "Theme",
            CapabilityKind::Plugin => "Plugin",
            CapabilityKind::MarkdownExtension => "Extension",
        }
    }

    /// Python entry-point group that registers this kind locally
    pub fn entry_points_group(self) -> &'static str {
        match self {
            CapabilityKind::Theme => "mkdocs.themes",
            CapabilityKind::Plugin => "mkdocs.plugins",
            CapabilityKind::MarkdownExtension => "markdown.extensions",
        }
    }
}

/// A catalog field that is either a single string or a sequence of strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn as_slice(&self) -> &[String] {
        match self {
            OneOrMany::One(s) => std::slice::from_ref(s),
            OneOrMany::Many(v) => v,
        }
    }
}

/// One catalog entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    mkdocs_theme: Option<OneOrMany>,
    mkdocs_plugin: Option<OneOrMany>,
    markdown_extension: Option<OneOrMany>,
    pub pypi_id: Option<String>,
    pub github_id: Option<String>,
    pub extra_dependencies: BTreeMap<String, OneOrMany>,
}

impl Project {
    /// Capability names this project declares for the given kind
    pub fn provides(&self, kind: CapabilityKind) -> &[String] {
        let field = match kind {
            CapabilityKind::Theme => &self.mkdocs_theme,
            CapabilityKind::Plugin => &self.mkdocs_plugin,
            CapabilityKind::MarkdownExtension => &self.markdown_extension,
        };
        field.as_ref().map_or(&[], OneOrMany::as_slice)
    }

    /// The pip install target: `pypi_id` wins, else a git URL from `github_id`
    pub fn install_name(&self) -> Option<String> {
        if let Some(id) = &self.pypi_id {
            return Some(id.clone());
        }
        self.github_id
            .as_ref()
            .map(|id| format!("git+https://github.com/{id}"))
    }
}

/// The parsed catalog document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Catalog {
    /// Parse a catalog from YAML bytes
    pub fn from_yaml(bytes: &[u8]) -> Result<Self> {
        serde_yaml::from_slice(bytes).map_err(|e| GetDepsError::CatalogParseFailed {
            reason: e.to_string(),
        })
    }

    /// Match wanted capability names against the catalog.
    ///
    /// Projects are consulted in catalog order and the first project to
    /// declare a wanted name claims it: the install target is added to
    /// `packages`, every extra-dependency rule whose dotted path resolves in
    /// `cfg` is activated, and the name is removed from its wanted set so
    /// later projects never see it.
    ///
    /// A declared plugin name `theme/suffix` also satisfies a wanted
    /// `suffix` when `theme` is the active theme and the full namespaced
    /// name is not itself wanted.
    pub fn resolve(
        &self,
        cfg: &Value,
        theme: Option<&str>,
        wanted: &mut [WantedSet],
        packages: &mut BTreeSet<String>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for project in &self.projects {
            for slot in wanted.iter_mut() {
                for declared in project.provides(slot.kind) {
                    let entry_name = match slot.kind {
                        CapabilityKind::Plugin => {
                            namespaced_suffix(declared, theme, &slot.names).unwrap_or(declared)
                        }
                        _ => declared.as_str(),
                    };
                    if !slot.names.contains(entry_name) {
                        continue;
                    }
                    let Some(install_name) = project.install_name() else {
                        diagnostics.push(Diagnostic::error(format!(
                            "Can't find how to install {} '{}' although it was identified as {:?}",
                            slot.kind.label(),
                            entry_name,
                            project
                        )));
                        continue;
                    };
                    packages.insert(install_name);
                    for (extra_key, extra_pkgs) in &project.extra_dependencies {
                        if dig(cfg, extra_key).is_some() {
                            packages.extend(extra_pkgs.as_slice().iter().cloned());
                        }
                    }
                    slot.names.remove(entry_name);
                }
            }
        }
    }
}

/// Strip the active theme's namespace off a declared plugin name, when the
/// bare suffix is wanted and the namespaced name is not
fn namespaced_suffix<'a>(
    declared: &'a str,
    theme: Option<&str>,
    wanted: &BTreeSet<String>,
) -> Option<&'a str> {
    let suffix = declared.strip_prefix(theme?)?.strip_prefix('/')?;
    if wanted.contains(suffix) && !wanted.contains(declared) {
        Some(suffix)
    } else {
        None
    }
}
