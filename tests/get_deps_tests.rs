//! End-to-end dependency inference tests using the real binary and a local
//! catalog fixture

mod common;

use common::{Site, lines};
use predicates::prelude::*;

#[test]
fn test_empty_config() {
    let site = Site::new("");
    site.cmd()
        .assert()
        .success()
        .stdout(predicate::str::diff(""))
        .stderr(predicate::str::contains(
            "doesn't seem to be a mkdocs.yml config file",
        ));
}

#[test]
fn test_just_search() {
    let site = Site::new("plugins: [search]\n");
    site.cmd()
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["mkdocs"])))
        .stderr(predicate::str::contains("WARNING").not());
}

#[test]
fn test_mkdocs_config() {
    let site = Site::new(concat!(
        "theme:\n",
        "  name: mkdocs\n",
        "  locale: en\n",
        "markdown_extensions:\n",
        "  - pymdownx.highlight:\n",
        "      use_pygments: false\n",
        "  - pymdownx.snippets\n",
        "  - callouts\n",
        "  - mdx_gh_links:\n",
        "      user: mkdocs\n",
        "      repo: mkdocs\n",
        "  - mkdocs-click\n",
        "plugins:\n",
        "  - search\n",
        "  - redirects:\n",
        "  - autorefs\n",
        "  - literate-nav:\n",
        "      nav_file: README.md\n",
        "  - mkdocstrings:\n",
        "      handlers:\n",
        "        python:\n",
        "          options:\n",
        "            docstring_section_style: list\n",
    ));
    site.cmd().assert().success().stdout(predicate::str::diff(lines(&[
        "markdown-callouts",
        "mdx-gh-links",
        "mkdocs",
        "mkdocs-autorefs",
        "mkdocs-click",
        "mkdocs-literate-nav",
        "mkdocs-redirects",
        "mkdocstrings",
        "mkdocstrings-python",
        "pymdown-extensions",
    ])));
}

#[test]
fn test_dict_keys_and_ignores_env_tags() {
    let site = Site::new(concat!(
        "theme:\n",
        "  name: material\n",
        "plugins:\n",
        "  code-validator:\n",
        "    enabled: !ENV [LINT, false]\n",
        "markdown_extensions:\n",
        "  pymdownx.emoji:\n",
        "    emoji_index: !!python/name:materialx.emoji.twemoji\n",
    ));
    site.cmd().assert().success().stdout(predicate::str::diff(lines(&[
        "mkdocs",
        "mkdocs-code-validator",
        "mkdocs-material",
        "pymdown-extensions",
    ])));
}

#[test]
fn test_theme_precedence() {
    // Active theme: the namespaced material/tags entry claims the bare name
    let site = Site::new("plugins:\n  - tags\ntheme: material\n");
    site.cmd()
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["mkdocs", "mkdocs-material"])));

    // Namespaced name requested verbatim
    let site = Site::new("plugins:\n  - material/tags\n");
    site.cmd()
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["mkdocs", "mkdocs-material"])));

    // No theme: only the bare entry matches
    let site = Site::new("plugins:\n  - tags\n");
    site.cmd()
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["mkdocs", "mkdocs-plugin-tags"])));
}

#[test]
fn test_nonexistent_capabilities_warn_once_each() {
    let site = Site::new(concat!(
        "plugins:\n",
        "  - taglttghhmdu\n",
        "  - syyisjupkbpo\n",
        "  - redirects\n",
        "theme: qndyakplooyh\n",
        "markdown_extensions:\n",
        "  - saqdhyndpvpa\n",
    ));
    let assert = site
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["mkdocs", "mkdocs-redirects"])))
        .stderr(predicate::str::contains(
            "Theme 'qndyakplooyh' is not provided by any registered project",
        ))
        .stderr(predicate::str::contains(
            "Plugin 'syyisjupkbpo' is not provided by any registered project",
        ))
        .stderr(predicate::str::contains(
            "Plugin 'taglttghhmdu' is not provided by any registered project",
        ))
        .stderr(predicate::str::contains(
            "Extension 'saqdhyndpvpa' is not provided by any registered project",
        ));
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert_eq!(stderr.matches("WARNING").count(), 4);
}

#[test]
fn test_github_install_target() {
    let site = Site::new("theme: bootstrap4\nplugins: [blog]\n");
    site.cmd().assert().success().stdout(predicate::str::diff(lines(&[
        "git+https://github.com/andyoakley/mkdocs-blog",
        "mkdocs",
        "mkdocs-bootstrap4",
    ])));
}

#[test]
fn test_multi_name_theme_project() {
    let site = Site::new("theme: minty\n");
    site.cmd()
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["mkdocs", "mkdocs-bootswatch"])));
}

#[test]
fn test_with_locale() {
    let site = Site::new("theme:\n  name: mkdocs\n  locale: uk\n");
    site.cmd()
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["mkdocs[i18n]"])));
}

#[test]
fn test_idempotent_runs() {
    let cfg = "theme: material\nplugins: [tags, unknown-one]\n";
    let site = Site::new(cfg);
    let first = site.cmd().assert().success();
    let second = site.cmd().assert().success();
    assert_eq!(first.get_output().stdout, second.get_output().stdout);
    assert_eq!(first.get_output().stderr, second.get_output().stderr);
}

#[test]
fn test_locally_installed_capability_is_an_info_note() {
    let site = Site::new("markdown_extensions:\n  - house-style\n");
    site.install_dist(
        "docs-house-style",
        "1.0.0",
        "[markdown.extensions]\nhouse-style = docs_house_style:HouseStyleExtension\n",
    );
    site.cmd()
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["mkdocs"])))
        .stderr(predicate::str::contains(
            "Extension 'house-style' is not provided by any registered project \
             but is installed locally from 'docs-house-style'",
        ))
        .stderr(predicate::str::contains("WARNING").not());
}

#[test]
fn test_builtin_markdown_extension_stays_silent() {
    let site = Site::new("markdown_extensions:\n  - toc\n");
    site.install_dist(
        "Markdown",
        "3.6",
        "[markdown.extensions]\ntoc = markdown.extensions.toc:TocExtension\n",
    );
    site.cmd()
        .assert()
        .success()
        .stdout(predicate::str::diff(lines(&["mkdocs"])))
        .stderr(predicate::str::contains("toc").not());
}

#[test]
fn test_verbose_shows_debug_output() {
    let site = Site::new("plugins: [search, unknown-one]\n");
    let mut cmd = site.cmd();
    cmd.arg("-v");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Wanted plugins:"))
        .stderr(predicate::str::contains(
            "Available 'mkdocs.plugins' entry points:",
        ));

    // Debug lines stay hidden without -v
    site.cmd()
        .assert()
        .success()
        .stderr(predicate::str::contains("entry points").not());
}

#[test]
fn test_missing_config_file_fails() {
    let site = Site::new("");
    let mut cmd = common::get_deps_cmd();
    cmd.current_dir(site.temp.path())
        .env("VIRTUAL_ENV", site.temp.path().join("venv"))
        .args(["-f", "absent.yml", "-p", "projects.yaml"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read configuration file"));
}

#[test]
fn test_non_mapping_config_fails() {
    let site = Site::new("");
    std::fs::write(site.temp.path().join("mkdocs.yml"), "- a\n- b\n").unwrap();
    site.cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("The configuration is invalid"));
}

#[test]
fn test_missing_projects_file_fails() {
    let site = Site::new("plugins: [search]\n");
    let mut cmd = common::get_deps_cmd();
    cmd.current_dir(site.temp.path())
        .env("VIRTUAL_ENV", site.temp.path().join("venv"))
        .args(["-f", "mkdocs.yml", "-p", "absent.yaml"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read projects file"));
}

#[test]
fn test_config_discovery_prefers_yml_then_yaml() {
    let site = Site::new("");
    std::fs::remove_file(site.temp.path().join("mkdocs.yml")).unwrap();
    std::fs::write(
        site.temp.path().join("mkdocs.yaml"),
        "site_name: Test\nplugins: [search]\n",
    )
    .unwrap();
    let mut cmd = common::get_deps_cmd();
    cmd.current_dir(site.temp.path())
        .env("VIRTUAL_ENV", site.temp.path().join("venv"))
        .args(["-p", "projects.yaml"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::diff(lines(&["mkdocs"])));
}
