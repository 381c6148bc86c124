//! Install and uninstall orchestration
//!
//! One catalog item at a time: status check, artifact resolution, installer
//! classification, verification gate, then the installer process. Conditions
//! that only skip the item come back as an [`Outcome`]; anything that leaves the
//! system in an unknown state (retrieval or installer failure) comes back as an
//! error for the batch's failure policy to handle.

pub mod batch;
mod install;
mod uninstall;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::Path;

use crate::cache::ArtifactPaths;
use crate::catalog::CatalogItem;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::installer::ToolPaths;
use crate::output::Reporter;
use crate::process::CommandRunner;
use crate::status::{ItemStatus, StatusCheck};
use crate::verify::{VerificationGate, Verifier};

/// How one install or uninstall ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Install requested, already installed at the catalog version
    AlreadySatisfied,
    /// Uninstall requested, nothing installed to remove
    NotInstalled,
    /// Extension or uninstall method has no installer
    Unsupported { kind: String },
    /// Artifact did not match the catalog digest after a fresh fetch
    HashMismatch,
    Installed,
    Removed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadySatisfied => write!(f, "already installed"),
            Self::NotInstalled => write!(f, "not installed"),
            Self::Unsupported { kind } => write!(f, "unsupported installer type '{kind}'"),
            Self::HashMismatch => write!(f, "hash mismatch"),
            Self::Installed => write!(f, "installed"),
            Self::Removed => write!(f, "removed"),
        }
    }
}

/// Everything an install or uninstall needs, borrowed for the length of a run
pub struct Orchestrator<'a> {
    pub cache_root: &'a Path,
    /// Repository base URL; item locations are appended verbatim
    pub repo_url: &'a str,
    pub verbose: bool,
    pub tools: &'a ToolPaths,
    pub status: &'a dyn StatusCheck,
    pub verifier: &'a dyn Verifier,
    pub fetcher: &'a dyn Fetcher,
    pub runner: &'a dyn CommandRunner,
    pub reporter: &'a dyn Reporter,
}

impl Orchestrator<'_> {
    /// Query the status collaborator; an error counts as "not installed"
    ///
    /// This errs toward a redundant reinstall rather than a missed install.
    fn status_of(&self, item: &CatalogItem) -> ItemStatus {
        match self.status.check_status(item) {
            Ok(status) => status,
            Err(e) => {
                self.reporter.warn(&format!(
                    "Unable to check status of item: {}",
                    item.display_name
                ));
                log::warn!("Status check for '{}' failed: {}", item.name, e);
                ItemStatus::default()
            }
        }
    }

    fn resolve(&self, item: &CatalogItem) -> Result<ArtifactPaths> {
        let paths = ArtifactPaths::resolve(
            self.cache_root,
            &item.installer_item_location,
            &item.display_name,
        )?;
        log::debug!(
            "'{}' cached under '{}' as {}",
            item.name,
            paths.relative_dir,
            paths.absolute_file.display()
        );
        Ok(paths)
    }

    /// Run the verification gate for `item`, reporting a mismatch
    fn verify_artifact(&self, item: &CatalogItem, paths: &ArtifactPaths) -> Result<bool> {
        let gate = VerificationGate {
            verifier: self.verifier,
            fetcher: self.fetcher,
            reporter: self.reporter,
            repo_url: self.repo_url,
        };

        let verified = gate.ensure_verified(
            paths,
            &item.installer_item_hash,
            &item.installer_item_location,
            &item.display_name,
        )?;
        if !verified {
            self.reporter
                .warn(&format!("Hash mismatch: {}", item.display_name));
        }
        Ok(verified)
    }
}
