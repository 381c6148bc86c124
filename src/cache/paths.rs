//! Cache path utilities
//!
//! Maps a catalog item's repository-relative location onto the local cache.

use std::path::{Path, PathBuf};

use crate::error::{GantryError, Result};

/// Default cache directory name under user's cache directory
const CACHE_DIR: &str = "gantry";

/// Environment variable overriding the cache root
pub const CACHE_DIR_ENV: &str = "GANTRY_CACHE_DIR";

/// Get the default cache directory path
///
/// Uses the platform's standard cache location (e.g. XDG on Linux, `%LOCALAPPDATA%` on
/// Windows) with a `gantry` subdirectory. Can be overridden with `GANTRY_CACHE_DIR`.
pub fn cache_dir() -> Result<PathBuf> {
    if let Ok(cache_dir) = std::env::var(CACHE_DIR_ENV) {
        return Ok(PathBuf::from(cache_dir));
    }

    let base = dirs::cache_dir().ok_or_else(|| GantryError::CacheOperationFailed {
        message: "Could not determine cache directory".to_string(),
    })?;

    Ok(base.join(CACHE_DIR))
}

/// Pick the cache root: CLI flag, then config file, then [`cache_dir`]
pub fn resolve_cache_root(cli: Option<PathBuf>, configured: Option<&Path>) -> Result<PathBuf> {
    match (cli, configured) {
        (Some(path), _) => Ok(path),
        (None, Some(path)) => Ok(path.to_path_buf()),
        (None, None) => cache_dir(),
    }
}

/// Local paths for one installer artifact
///
/// Derived fresh on every call; the artifact behind a location can change between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Final path segment of the location
    pub file_name: String,
    /// Everything before the final segment, `/`-joined
    pub relative_dir: String,
    /// `cache_root/relative_dir`
    pub absolute_dir: PathBuf,
    /// `absolute_dir/file_name`
    pub absolute_file: PathBuf,
    /// Lowercased extension including the dot (".msi"), or empty
    pub extension: String,
}

impl ArtifactPaths {
    /// Resolve a `/`-delimited repository location under `cache_root`
    ///
    /// `item` is only used in the error. Fails for an empty final segment and for
    /// `..` segments, which would escape the cache.
    pub fn resolve(cache_root: &Path, location: &str, item: &str) -> Result<Self> {
        let invalid = || GantryError::InvalidInstallerLocation {
            item: item.to_string(),
            location: location.to_string(),
        };

        let mut tokens: Vec<&str> = location.split('/').collect();
        let file_name = tokens.pop().filter(|name| !name.is_empty()).ok_or_else(invalid)?;
        if file_name == "." || tokens.iter().chain([&file_name]).any(|t| *t == "..") {
            return Err(invalid());
        }

        let relative_dir = tokens.join("/");
        let absolute_dir = tokens
            .iter()
            .filter(|t| !t.is_empty() && **t != ".")
            .fold(cache_root.to_path_buf(), |dir, segment| dir.join(segment));
        let absolute_file = absolute_dir.join(file_name);

        Ok(Self {
            file_name: file_name.to_string(),
            relative_dir,
            absolute_dir,
            absolute_file,
            extension: extension_of(file_name),
        })
    }
}

/// Lowercased suffix from the last `.` of a file name, or empty
fn extension_of(file_name: &str) -> String {
    file_name
        .rfind('.')
        .map(|idx| file_name[idx..].to_lowercase())
        .unwrap_or_default()
}
