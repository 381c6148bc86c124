//! Manifest (manifest.yaml): which catalog items this machine should have

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{self, GantryError, Result};

/// Items to install and remove, by catalog name
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Manifest {
    #[serde(default)]
    pub managed_installs: Vec<String>,

    #[serde(default)]
    pub managed_uninstalls: Vec<String>,
}

impl Manifest {
    /// Parse a manifest from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(yaml)?;
        Ok(manifest)
    }

    /// Load a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| error::config::read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&content).map_err(|e| match e {
            GantryError::ConfigParseFailed { reason, .. } => {
                error::config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }
}
