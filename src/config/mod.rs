//! Agent configuration (config.yaml)
//!
//! Relative paths in the file (catalog, manifest, cache, receipts) are resolved
//! against the directory containing the config file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{self, GantryError, Result};

/// Default config directory name under the user's config directory
const CONFIG_DIR: &str = "gantry";

/// Default config file name
pub const CONFIG_FILE: &str = "config.yaml";

/// Default receipts file name under the user's local data directory
const RECEIPTS_FILE: &str = "receipts.json";

/// What a batch does when one item fails fatally
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failed item
    #[default]
    FailFast,
    /// Report the failure and carry on with the next item
    Continue,
}

/// Installer tool path overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ToolOverrides {
    #[serde(default)]
    pub chocolatey: Option<PathBuf>,

    #[serde(default)]
    pub msiexec: Option<PathBuf>,
}

/// Agent configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AgentConfig {
    /// Repository base URL; item locations are appended to it verbatim
    pub url: String,

    /// Catalog file
    pub catalog: PathBuf,

    /// Manifest file used by `gantry run`
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    /// Local artifact cache root
    #[serde(default)]
    pub cache_path: Option<PathBuf>,

    /// Installed-item receipts file
    #[serde(default)]
    pub receipts_path: Option<PathBuf>,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    #[serde(default)]
    pub tools: ToolOverrides,
}

impl AgentConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, resolving relative paths against its directory
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(error::config::not_found(path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| error::config::read_failed(path.display().to_string(), e.to_string()))?;

        let mut config = Self::from_yaml(&content).map_err(|e| match e {
            GantryError::ConfigParseFailed { reason, .. } => {
                error::config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(error::config::invalid("'url' must not be empty"));
        }
        if self.catalog.as_os_str().is_empty() {
            return Err(error::config::invalid("'catalog' must not be empty"));
        }
        Ok(())
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let absolutize = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        absolutize(&mut self.catalog);
        if let Some(p) = self.manifest.as_mut() {
            absolutize(p);
        }
        if let Some(p) = self.cache_path.as_mut() {
            absolutize(p);
        }
        if let Some(p) = self.receipts_path.as_mut() {
            absolutize(p);
        }
    }

    /// Receipts file: configured path, or `<local data dir>/gantry/receipts.json`
    pub fn receipts_file(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.receipts_path {
            return Ok(path.clone());
        }

        let base = dirs::data_local_dir().ok_or_else(|| {
            error::config::invalid("Could not determine local data directory for receipts")
        })?;
        Ok(base.join(CONFIG_DIR).join(RECEIPTS_FILE))
    }
}

/// Config file location: explicit path, or `<user config dir>/gantry/config.yaml`
///
/// `GANTRY_CONFIG` is read by the CLI layer and arrives here as the explicit path.
pub fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    let base = dirs::config_dir()
        .ok_or_else(|| error::config::invalid("Could not determine config directory"))?;
    Ok(base.join(CONFIG_DIR).join(CONFIG_FILE))
}
