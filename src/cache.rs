//! On-disk cache for the downloaded catalog
//!
//! Content is cached under the platform cache directory keyed by a hash of
//! the URL, and reused while younger than the freshness window. A failed
//! download falls back to a stale copy when one exists.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{GetDepsError, Result};
use crate::resolver::Diagnostic;

/// Cache subdirectory name under the user's cache directory
const CACHE_DIR: &str = "mkdocs-get-deps";

/// Get the cache directory path.
///
/// Uses the platform's standard cache location (e.g. XDG on Linux,
/// Library/Caches on macOS) with an `mkdocs-get-deps` subdirectory. Can be
/// overridden with the `MKDOCS_GET_DEPS_CACHE_DIR` environment variable.
pub fn cache_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("MKDOCS_GET_DEPS_CACHE_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::cache_dir().ok_or_else(|| GetDepsError::CacheOperationFailed {
        message: "Could not determine cache directory".to_string(),
    })?;

    Ok(base.join(CACHE_DIR))
}

/// Cache file path for a URL: a hash of the URL, nothing guessable
fn url_cache_path(url: &str) -> Result<PathBuf> {
    let key = blake3::hash(url.as_bytes()).to_hex();
    Ok(cache_dir()?.join(key.as_str()))
}

/// Download a URL without consulting or updating the cache
pub fn download(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::blocking::get(url)
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|e| GetDepsError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
    let bytes = response.bytes().map_err(|e| GetDepsError::DownloadFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(bytes.to_vec())
}

/// Return the cached content for a URL if younger than `max_age`, else
/// download and cache a fresh copy.
///
/// When the download fails and a stale copy exists, the stale copy is
/// returned with a warning instead of failing outright.
pub fn download_and_cache_url(
    url: &str,
    max_age: Duration,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<u8>> {
    let path = url_cache_path(url)?;

    if let Ok(metadata) = std::fs::metadata(&path) {
        let fresh = metadata
            .modified()
            .ok()
            .and_then(|mtime| mtime.elapsed().ok())
            .is_some_and(|age| age < max_age);
        if fresh {
            diagnostics.push(Diagnostic::debug(format!(
                "Using cached copy of {url} from {}",
                path.display()
            )));
            return Ok(std::fs::read(&path)?);
        }
    }

    diagnostics.push(Diagnostic::debug(format!("Downloading {url}")));
    let content = match download(url) {
        Ok(content) => content,
        Err(err) => {
            if path.is_file() {
                diagnostics.push(Diagnostic::warning(format!(
                    "Failed to refresh {url}, using stale cached copy: {err}"
                )));
                return Ok(std::fs::read(&path)?);
            }
            return Err(err);
        }
    };

    store(&path, &content)?;
    Ok(content)
}

/// Atomically write content next to its final path
fn store(path: &std::path::Path, content: &[u8]) -> Result<()> {
    let dir = path.parent().ok_or_else(|| GetDepsError::CacheOperationFailed {
        message: format!("Invalid cache path: {}", path.display()),
    })?;
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.persist(path)
        .map_err(|e| GetDepsError::CacheOperationFailed {
            message: format!("Failed to store {}: {}", path.display(), e),
        })?;
    Ok(())
}
