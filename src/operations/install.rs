//! Install direction: dispatch on the artifact's file extension

use crate::catalog::CatalogItem;
use crate::error::Result;
use crate::installer::InstallerKind;

use super::{Orchestrator, Outcome};

impl Orchestrator<'_> {
    /// Install `item` unless it is already installed at the catalog version
    pub fn install(&self, item: &CatalogItem) -> Result<Outcome> {
        if self.status_of(item).is_current() {
            self.reporter
                .info(&format!("{} already installed.", item.display_name));
            return Ok(Outcome::AlreadySatisfied);
        }

        let paths = self.resolve(item)?;

        // Classified before the gate so unsupported types never trigger a download
        let kind = InstallerKind::from_extension(&paths.extension);
        let Some(invocation) =
            kind.and_then(|k| k.install_command(self.tools, &paths.absolute_file))
        else {
            match kind {
                Some(kind) => self.reporter.warn(&format!(
                    "{} support not added yet: {}",
                    kind.label(),
                    paths.file_name
                )),
                None => {
                    self.reporter
                        .warn(&format!("Unable to install {}", paths.file_name));
                    self.reporter.warn(&format!(
                        "Installer type unsupported: {}",
                        paths.extension
                    ));
                }
            }
            return Ok(Outcome::Unsupported {
                kind: paths.extension,
            });
        };

        if !self.verify_artifact(item, &paths)? {
            return Ok(Outcome::HashMismatch);
        }

        match kind {
            Some(InstallerKind::Msi) => self
                .reporter
                .info(&format!("Installing MSI for {}", paths.file_name)),
            _ => self
                .reporter
                .info(&format!("Installing choco: {}", paths.file_name)),
        }

        self.runner.run(&invocation, self.verbose)?;
        log::debug!("Installed '{}'", item.name);
        Ok(Outcome::Installed)
    }
}
