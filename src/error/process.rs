//! Installer process errors

use super::GantryError;

/// Creates an error for a command that could not be started
pub fn launch_failed(
    command: impl Into<String>,
    args: &[String],
    reason: impl Into<String>,
) -> GantryError {
    GantryError::CommandLaunchFailed {
        command: command.into(),
        args: args.to_vec(),
        reason: reason.into(),
    }
}

/// Creates an error for a command that ran but did not succeed
pub fn command_failed(
    command: impl Into<String>,
    args: &[String],
    reason: impl Into<String>,
) -> GantryError {
    GantryError::CommandFailed {
        command: command.into(),
        args: args.to_vec(),
        reason: reason.into(),
    }
}
