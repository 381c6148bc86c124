//! Installed-item status
//!
//! The orchestrator only asks "is this item installed, and at the catalog
//! version?". [`ReceiptStore`] answers from a JSON file of receipts written
//! after each successful install and removed after each successful uninstall.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::error::{GantryError, Result};

/// Installed state of one catalog item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemStatus {
    pub installed: bool,
    pub version_matches: bool,
}

impl ItemStatus {
    /// Installed at the catalog version
    pub fn is_current(self) -> bool {
        self.installed && self.version_matches
    }
}

/// Reports whether an item is installed
pub trait StatusCheck {
    fn check_status(&self, item: &CatalogItem) -> Result<ItemStatus>;
}

/// One installed item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Receipt {
    pub version: String,
    pub display_name: String,
}

/// Receipts file (receipts.json), keyed by catalog item name
///
/// Every call reads or rewrites the file, so the store holds no state of its own.
#[derive(Debug, Clone)]
pub struct ReceiptStore {
    path: PathBuf,
}

impl ReceiptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all receipts; a missing file means nothing is installed
    pub fn read(&self) -> Result<BTreeMap<String, Receipt>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| GantryError::IoError {
            message: format!("Failed to read receipts {}: {}", self.path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| GantryError::ConfigParseFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn write(&self, receipts: &BTreeMap<String, Receipt>) -> Result<()> {
        let write_failed = |reason: String| GantryError::FileWriteFailed {
            path: self.path.display().to_string(),
            reason,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_failed(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(receipts)?;
        fs::write(&self.path, content).map_err(|e| write_failed(e.to_string()))
    }

    /// Record `item` as installed at its catalog version
    pub fn record_installed(&self, item: &CatalogItem) -> Result<()> {
        let mut receipts = self.read()?;
        receipts.insert(
            item.name.clone(),
            Receipt {
                version: item.version.clone(),
                display_name: item.display_name.clone(),
            },
        );
        self.write(&receipts)
    }

    /// Forget `item`
    pub fn record_removed(&self, item: &CatalogItem) -> Result<()> {
        let mut receipts = self.read()?;
        if receipts.remove(&item.name).is_some() {
            self.write(&receipts)?;
        }
        Ok(())
    }
}

impl StatusCheck for ReceiptStore {
    fn check_status(&self, item: &CatalogItem) -> Result<ItemStatus> {
        let receipts = self.read()?;
        Ok(match receipts.get(&item.name) {
            Some(receipt) => ItemStatus {
                installed: true,
                version_matches: receipt.version == item.version,
            },
            None => ItemStatus::default(),
        })
    }
}
