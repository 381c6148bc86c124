//! Manifest run: managed installs first, then managed uninstalls

use crate::catalog::Manifest;
use crate::cli::RunArgs;
use crate::error::{Result, config};
use crate::operations::batch::Request;

use super::context::{AgentContext, GlobalOptions};

/// Apply the manifest given on the command line, or the configured one
pub fn run(options: &GlobalOptions, args: RunArgs) -> Result<()> {
    let context = AgentContext::load(options)?;

    let manifest_path = args
        .manifest
        .or_else(|| context.config.manifest.clone())
        .ok_or_else(|| {
            config::invalid("No manifest given: pass --manifest or set 'manifest' in the config")
        })?;
    let manifest = Manifest::load(&manifest_path)?;
    log::debug!(
        "Manifest {}: {} installs, {} uninstalls",
        manifest_path.display(),
        manifest.managed_installs.len(),
        manifest.managed_uninstalls.len()
    );

    context.apply(&Request::from_manifest(&manifest))?;
    Ok(())
}
