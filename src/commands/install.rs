//! Install command implementation

use crate::cli::InstallArgs;
use crate::error::Result;
use crate::operations::batch::Request;

use super::context::{AgentContext, GlobalOptions};

/// Install the named catalog items in order
pub fn run(options: &GlobalOptions, args: InstallArgs) -> Result<()> {
    let context = AgentContext::load(options)?;
    let requests: Vec<Request> = args.names.into_iter().map(Request::install).collect();
    context.apply(&requests)?;
    Ok(())
}
