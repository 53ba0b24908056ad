//! Shared helpers for integration tests: a temp site directory with a
//! mkdocs.yml, a local catalog fixture, and an empty virtualenv so the
//! entry-point scanner never sees the host machine's packages.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Catalog fixture covering themes, namespaced plugins, github-only
/// projects and extra-dependency rules
pub const EXAMPLE_PROJECTS: &str = r#"projects:
  - mkdocs_theme: material
    mkdocs_plugin: [material/tags, material/social]
    pypi_id: mkdocs-material
  - mkdocs_theme: [cerulean, cosmo, cyborg, darkly, flatly, journal, litera, lumen, lux, materia, minty, pulse]
    pypi_id: mkdocs-bootswatch
  - mkdocs_theme: bootstrap4
    pypi_id: mkdocs-bootstrap4
  - mkdocs_plugin: tags
    pypi_id: mkdocs-plugin-tags
  - mkdocs_plugin: blog
    github_id: andyoakley/mkdocs-blog
  - mkdocs_plugin: redirects
    pypi_id: mkdocs-redirects
  - mkdocs_plugin: autorefs
    pypi_id: mkdocs-autorefs
  - mkdocs_plugin: literate-nav
    pypi_id: mkdocs-literate-nav
  - mkdocs_plugin: mkdocstrings
    pypi_id: mkdocstrings
    extra_dependencies:
      plugins.mkdocstrings.handlers.python: mkdocstrings-python
      plugins.mkdocstrings.handlers.crystal: mkdocstrings-crystal
  - mkdocs_plugin: code-validator
    pypi_id: mkdocs-code-validator
  - markdown_extension: [pymdownx.highlight, pymdownx.snippets, pymdownx.superfences, pymdownx.emoji]
    pypi_id: pymdown-extensions
  - markdown_extension: callouts
    pypi_id: markdown-callouts
  - markdown_extension: mdx_gh_links
    pypi_id: mdx-gh-links
  - markdown_extension: mkdocs-click
    pypi_id: mkdocs-click
"#;

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn get_deps_cmd() -> Command {
    Command::cargo_bin("mkdocs-get-deps").unwrap()
}

/// A temp directory holding mkdocs.yml, the catalog fixture, and an empty
/// virtualenv
pub struct Site {
    pub temp: TempDir,
}

impl Site {
    /// Write `cfg` (prefixed with a site_name, unless empty) as mkdocs.yml
    pub fn new(cfg: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let body = if cfg.is_empty() {
            String::new()
        } else {
            format!("site_name: Test\n{cfg}")
        };
        std::fs::write(temp.path().join("mkdocs.yml"), body).unwrap();
        std::fs::write(temp.path().join("projects.yaml"), EXAMPLE_PROJECTS).unwrap();
        std::fs::create_dir_all(temp.path().join("venv/site-packages")).unwrap();
        Self { temp }
    }

    pub fn site_packages(&self) -> PathBuf {
        self.temp.path().join("venv/site-packages")
    }

    /// Register a fake locally installed package providing entry points
    pub fn install_dist(&self, dist: &str, version: &str, entry_points: &str) {
        let dist_info = self
            .site_packages()
            .join(format!("{}-{version}.dist-info", dist.replace('-', "_")));
        std::fs::create_dir_all(&dist_info).unwrap();
        std::fs::write(
            dist_info.join("METADATA"),
            format!("Metadata-Version: 2.1\nName: {dist}\nVersion: {version}\n"),
        )
        .unwrap();
        std::fs::write(dist_info.join("entry_points.txt"), entry_points).unwrap();
    }

    /// Command wired to this site's config, catalog and virtualenv
    pub fn cmd(&self) -> Command {
        let mut cmd = get_deps_cmd();
        cmd.current_dir(self.temp.path())
            .env("VIRTUAL_ENV", self.temp.path().join("venv"))
            .args(["-f", "mkdocs.yml", "-p", "projects.yaml"]);
        cmd
    }
}

/// Expected stdout for a package list: one per line, trailing newline
pub fn lines(packages: &[&str]) -> String {
    let mut out = packages.join("\n");
    if !packages.is_empty() {
        out.push('\n');
    }
    out
}
