//! Uninstall command implementation

use crate::cli::UninstallArgs;
use crate::error::Result;
use crate::operations::batch::Request;

use super::context::{AgentContext, GlobalOptions};

/// Uninstall the named catalog items in order
pub fn run(options: &GlobalOptions, args: UninstallArgs) -> Result<()> {
    let context = AgentContext::load(options)?;
    let requests: Vec<Request> = args.names.into_iter().map(Request::uninstall).collect();
    context.apply(&requests)?;
    Ok(())
}
