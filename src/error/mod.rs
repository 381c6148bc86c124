//! Error types and handling for Gantry
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Per-item conditions that only skip an item (already installed, unsupported
//! installer type, hash mismatch) are not errors; they are reported through
//! [`crate::operations::Outcome`]. Everything here aborts the item, and under the
//! fail-fast policy the whole run.
//!
//! Sub-modules hold convenience constructors by error domain:
//! - [`config`]: Configuration and catalog errors
//! - [`process`]: Installer process errors

pub mod config;
pub mod process;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Gantry operations
#[derive(Error, Diagnostic, Debug)]
pub enum GantryError {
    // Catalog errors
    #[error("Invalid installer location for '{item}': '{location}'")]
    #[diagnostic(
        code(gantry::catalog::invalid_location),
        help("installer_item_location must end in a file name, e.g. apps/tool/tool.msi")
    )]
    InvalidInstallerLocation { item: String, location: String },

    // Retrieval errors
    #[error("Unable to retrieve package {location}: {reason}")]
    #[diagnostic(
        code(gantry::fetch::retrieval_failed),
        help("Check that the repository url is reachable and the item location is correct")
    )]
    RetrievalFailed { location: String, reason: String },

    // Process errors
    #[error("Error running command: {command} {args:?}: {reason}")]
    #[diagnostic(
        code(gantry::process::launch_failed),
        help("Check that the installer tool exists, or override its path under 'tools' in the config")
    )]
    CommandLaunchFailed {
        command: String,
        args: Vec<String>,
        reason: String,
    },

    #[error("Installer error: {command} {args:?}: {reason}")]
    #[diagnostic(code(gantry::process::command_failed))]
    CommandFailed {
        command: String,
        args: Vec<String>,
        reason: String,
    },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(gantry::config::not_found),
        help("Pass --config <path> or set GANTRY_CONFIG")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(gantry::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(gantry::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(gantry::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(gantry::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(gantry::fs::io_error))]
    IoError { message: String },

    // Cache errors
    #[error("Cache operation failed: {message}")]
    #[diagnostic(code(gantry::cache::operation_failed))]
    CacheOperationFailed { message: String },

    // Batch errors
    #[error("{failed} item(s) failed")]
    #[diagnostic(
        code(gantry::batch::items_failed),
        help("Errors for each item were reported above")
    )]
    ItemsFailed { failed: usize },
}

impl From<std::io::Error> for GantryError {
    fn from(err: std::io::Error) -> Self {
        GantryError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for GantryError {
    fn from(err: serde_yaml::Error) -> Self {
        GantryError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for GantryError {
    fn from(err: serde_json::Error) -> Self {
        GantryError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for GantryError {
    fn from(err: reqwest::Error) -> Self {
        GantryError::RetrievalFailed {
            location: err
                .url()
                .map_or_else(|| "unknown".to_string(), ToString::to_string),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, GantryError>;
