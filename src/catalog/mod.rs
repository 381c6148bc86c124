//! Catalog (catalog.yaml) data structures
//!
//! The catalog maps an item name to everything needed to install or remove it:
//! where its installer artifact lives in the repository, the digest that artifact
//! must match, and how it is uninstalled.

pub mod manifest;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{self, GantryError, Result};

pub use manifest::Manifest;

/// One installable package
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CatalogItem {
    /// Catalog key, filled in when the catalog is loaded
    #[serde(skip)]
    pub name: String,

    /// Human-readable label, used only for messages
    pub display_name: String,

    /// Version the status check compares against
    #[serde(default)]
    pub version: String,

    /// Repository-relative path of the installer artifact (e.g. "apps/tool/tool.msi")
    pub installer_item_location: String,

    /// Expected digest of the installer artifact
    pub installer_item_hash: String,

    /// Uninstall command family ("choco", "msi")
    #[serde(default)]
    pub uninstall_method: String,
}

/// All catalog items, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: BTreeMap<String, CatalogItem>,
}

impl Catalog {
    /// Parse a catalog from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut items: BTreeMap<String, CatalogItem> = serde_yaml::from_str(yaml)?;
        for (name, item) in &mut items {
            item.name.clone_from(name);
        }
        Ok(Self { items })
    }

    /// Load a catalog file
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

    /// Find an item by name
    pub fn get(&self, name: &str) -> Option<&CatalogItem> {
        self.items.get(name)
    }

    /// Number of items in the catalog
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
