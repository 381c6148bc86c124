//! Uninstall direction: dispatch on the item's declared uninstall method

use crate::catalog::CatalogItem;
use crate::error::Result;
use crate::installer::UninstallMethod;

use super::{Orchestrator, Outcome};

impl Orchestrator<'_> {
    /// Uninstall `item` if it is installed at the catalog version
    ///
    /// The artifact is verified (and fetched if needed) here too: `choco uninstall`
    /// is pointed at the package file, not at an installed product id.
    pub fn uninstall(&self, item: &CatalogItem) -> Result<Outcome> {
        if !self.status_of(item).is_current() {
            log::debug!("'{}' is not installed, nothing to remove", item.name);
            return Ok(Outcome::NotInstalled);
        }

        let paths = self.resolve(item)?;

        let Some(method) = UninstallMethod::parse(&item.uninstall_method) else {
            self.reporter
                .warn(&format!("Unable to uninstall {}", item.display_name));
            self.reporter.warn(&format!(
                "Installer type unsupported: {}",
                item.uninstall_method
            ));
            return Ok(Outcome::Unsupported {
                kind: item.uninstall_method.clone(),
            });
        };

        if !self.verify_artifact(item, &paths)? {
            return Ok(Outcome::HashMismatch);
        }

        self.reporter.info(&format!(
            "Uninstalling {}: {}",
            method.label(),
            item.display_name
        ));
        let invocation = method.uninstall_command(self.tools, &paths.absolute_file);
        self.runner.run(&invocation, self.verbose)?;

        log::debug!("Removed '{}'", item.name);
        Ok(Outcome::Removed)
    }
}
