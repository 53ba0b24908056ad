//! Locally installed entry points, for softer diagnostics
//!
//! A capability the catalog knows nothing about may still be registered in
//! the local Python environment. The registry answers "who provides this
//! name locally" per entry-point group, so unmatched capabilities can be
//! downgraded from a warning to an informational note.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::process::Command;

use walkdir::WalkDir;

use crate::resolver::{Diagnostic, WantedSet};

/// Distributions that ship with the core tooling; their registrations are
/// expected to have no catalog entry
const BUILTIN_DISTS: [&str; 2] = ["mkdocs", "Markdown"];

/// One locally registered entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    #[allow(dead_code)]
    pub name: String,
    /// Owning distribution name, when the metadata reveals it
    pub dist: Option<String>,
}

/// Supplies entry points for a group; implemented by the Python environment
/// scanner and by in-memory fakes in tests
pub trait EntryPointSource {
    fn entry_points(&self, group: &str) -> BTreeMap<String, EntryPoint>;
}

/// Lazily-populated per-group lookup table over an [`EntryPointSource`].
///
/// Each group is scanned at most once per run; the local registration set
/// does not change while the tool is running.
pub struct LocalRegistry {
    source: Box<dyn EntryPointSource>,
    groups: HashMap<String, BTreeMap<String, EntryPoint>>,
}

impl LocalRegistry {
    pub fn new(source: Box<dyn EntryPointSource>) -> Self {
        Self {
            source,
            groups: HashMap::new(),
        }
    }

    /// The registered entry points for a group, scanning on first use
    pub fn group(&mut self, group: &str) -> &BTreeMap<String, EntryPoint> {
        self.groups
            .entry(group.to_string())
            .or_insert_with(|| self.source.entry_points(group))
    }

    /// Scan a group if it has not been scanned yet, reporting what was
    /// found as a debug diagnostic on the first scan only
    pub fn populate(&mut self, group: &str) -> Option<Diagnostic> {
        if self.groups.contains_key(group) {
            return None;
        }
        let eps = self.source.entry_points(group);
        let diagnostic = Diagnostic::debug(format!(
            "Available '{group}' entry points: {:?}",
            eps.keys().collect::<Vec<_>>()
        ));
        self.groups.insert(group.to_string(), eps);
        Some(diagnostic)
    }
}

/// Emit a diagnostic for every name left unmatched after the catalog scan.
///
/// Names registered by the bundled distributions are benign and silent.
/// Names registered by anything else get an informational note; names with
/// no local registration at all get a warning.
pub fn unmatched_diagnostics(
    registry: &mut LocalRegistry,
    wanted: &[WantedSet],
    diagnostics: &mut Vec<Diagnostic>,
) {
    for slot in wanted {
        if slot.names.is_empty() {
            continue;
        }
        let group = slot.kind.entry_points_group();
        if let Some(diagnostic) = registry.populate(group) {
            diagnostics.push(diagnostic);
        }
        let eps = registry.group(group);
        for name in &slot.names {
            let ep = eps.get(name);
            let dist = ep.and_then(|e| e.dist.as_deref());
            if dist.is_some_and(|d| BUILTIN_DISTS.contains(&d)) {
                continue;
            }
            let mut message = format!(
                "{} '{}' is not provided by any registered project",
                slot.kind.label_capitalized(),
                name
            );
            match ep {
                Some(ep) => {
                    message.push_str(" but is installed locally");
                    if let Some(dist) = &ep.dist {
                        message.push_str(&format!(" from '{dist}'"));
                    }
                    diagnostics.push(Diagnostic::info(message));
                }
                None => diagnostics.push(Diagnostic::warning(message)),
            }
        }
    }
}

/// Scans Python `*.dist-info` metadata for entry-point registrations
pub struct PythonEnvScanner {
    site_dirs: Vec<PathBuf>,
}

impl PythonEnvScanner {
    /// Discover site-packages directories for the active environment.
    ///
    /// An active virtualenv is preferred; otherwise `python3` is asked for
    /// its site directories. A missing interpreter yields an empty registry
    /// rather than an error.
    pub fn discover() -> Self {
        let mut site_dirs = Vec::new();
        if let Ok(venv) = std::env::var("VIRTUAL_ENV") {
            for entry in WalkDir::new(&venv)
                .max_depth(4)
                .into_iter()
                .filter_map(std::result::Result::ok)
            {
                if entry.file_type().is_dir() && entry.file_name() == "site-packages" {
                    site_dirs.push(entry.into_path());
                }
            }
        }
        if site_dirs.is_empty() {
            site_dirs = interpreter_site_dirs();
        }
        Self { site_dirs }
    }

    /// Scanner over a fixed directory list (used in tests)
    #[allow(dead_code)]
    pub fn with_dirs(site_dirs: Vec<PathBuf>) -> Self {
        Self { site_dirs }
    }
}

fn interpreter_site_dirs() -> Vec<PathBuf> {
    let script = "import site\nfor d in site.getsitepackages() + [site.getusersitepackages()]:\n    print(d)";
    let Ok(output) = Command::new("python3").args(["-c", script]).output() else {
        return Vec::new();
    };
    if !output.status.success() {
        return Vec::new();
    }
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

impl EntryPointSource for PythonEnvScanner {
    fn entry_points(&self, group: &str) -> BTreeMap<String, EntryPoint> {
        let mut out = BTreeMap::new();
        for site_dir in &self.site_dirs {
            let Ok(entries) = std::fs::read_dir(site_dir) else {
                continue;
            };
            for entry in entries.filter_map(std::result::Result::ok) {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("dist-info") {
                    continue;
                }
                let Ok(ini) = std::fs::read_to_string(path.join("entry_points.txt")) else {
                    continue;
                };
                let dist = dist_name(&path);
                for name in group_entries(&ini, group) {
                    out.entry(name.clone()).or_insert_with(|| EntryPoint {
                        name,
                        dist: dist.clone(),
                    });
                }
            }
        }
        out
    }
}

/// Entry-point names declared under `[group]` in an entry_points.txt body
fn group_entries(ini: &str, group: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut in_group = false;
    for line in ini.lines() {
        let line = line.trim();
        if line.starts_with('[') && line.ends_with(']') {
            in_group = line[1..line.len() - 1].trim() == group;
        } else if in_group {
            if let Some((name, _)) = line.split_once('=') {
                let name = name.trim();
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
        }
    }
    names
}

/// Distribution name from dist-info METADATA, falling back to the directory
/// name prefix (`mkdocs-1.6.0.dist-info` -> `mkdocs`)
fn dist_name(dist_info: &std::path::Path) -> Option<String> {
    if let Ok(metadata) = std::fs::read_to_string(dist_info.join("METADATA")) {
        for line in metadata.lines() {
            if let Some(name) = line.strip_prefix("Name:") {
                return Some(name.trim().to_string());
            }
            if line.is_empty() {
                break;
            }
        }
    }
    let stem = dist_info.file_stem()?.to_str()?;
    stem.split('-').next().map(str::to_string)
}
