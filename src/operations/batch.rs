//! Applying many install/uninstall requests under a failure policy
//!
//! Items run strictly one after another. Skips never stop the batch; errors stop
//! it under [`FailurePolicy::FailFast`] and are collected under
//! [`FailurePolicy::Continue`].

use crate::catalog::{Catalog, Manifest};
use crate::config::FailurePolicy;
use crate::error::Result;
use crate::status::ReceiptStore;

use super::{Orchestrator, Outcome};

/// Requested direction for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Uninstall,
}

/// One requested catalog item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub action: Action,
    pub name: String,
}

impl Request {
    pub fn install(name: impl Into<String>) -> Self {
        Self {
            action: Action::Install,
            name: name.into(),
        }
    }

    pub fn uninstall(name: impl Into<String>) -> Self {
        Self {
            action: Action::Uninstall,
            name: name.into(),
        }
    }

    /// Manifest installs first, then uninstalls
    pub fn from_manifest(manifest: &Manifest) -> Vec<Self> {
        manifest
            .managed_installs
            .iter()
            .map(Self::install)
            .chain(manifest.managed_uninstalls.iter().map(Self::uninstall))
            .collect()
    }
}

/// Tally of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub installed: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub missing: Vec<String>,
    /// Names of items that failed (only under [`FailurePolicy::Continue`])
    pub failed: Vec<String>,
}

impl BatchReport {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Installed => self.installed += 1,
            Outcome::Removed => self.removed += 1,
            Outcome::AlreadySatisfied | Outcome::NotInstalled => self.unchanged += 1,
            Outcome::Unsupported { .. } | Outcome::HashMismatch => self.skipped += 1,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} installed, {} removed, {} unchanged, {} skipped, {} missing, {} failed",
            self.installed,
            self.removed,
            self.unchanged,
            self.skipped,
            self.missing.len(),
            self.failed.len()
        )
    }
}

/// Apply `requests` in order
///
/// Successful installs and removals update `receipts` when given; a receipt
/// write failure is only a warning.
pub fn apply(
    orchestrator: &Orchestrator<'_>,
    catalog: &Catalog,
    requests: &[Request],
    policy: FailurePolicy,
    receipts: Option<&ReceiptStore>,
) -> Result<BatchReport> {
    let reporter = orchestrator.reporter;
    let mut report = BatchReport::default();

    for request in requests {
        let Some(item) = catalog.get(&request.name) else {
            reporter.warn(&format!("Item not found in catalog: {}", request.name));
            report.missing.push(request.name.clone());
            continue;
        };

        let result = match request.action {
            Action::Install => orchestrator.install(item),
            Action::Uninstall => orchestrator.uninstall(item),
        };

        match result {
            Ok(outcome) => {
                log::debug!("'{}': {}", item.name, outcome);
                report.record(&outcome);

                let recorded = match (&outcome, receipts) {
                    (Outcome::Installed, Some(store)) => store.record_installed(item),
                    (Outcome::Removed, Some(store)) => store.record_removed(item),
                    _ => Ok(()),
                };
                if let Err(e) = recorded {
                    reporter.warn(&format!(
                        "Unable to record status of {}: {}",
                        item.display_name, e
                    ));
                }
            }
            Err(e) => match policy {
                FailurePolicy::FailFast => return Err(e),
                FailurePolicy::Continue => {
                    reporter.error(&format!("{}: {}", item.display_name, e));
                    report.failed.push(item.name.clone());
                }
            },
        }
    }

    reporter.info(&report.summary());
    Ok(report)
}
