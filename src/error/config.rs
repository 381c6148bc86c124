//! Configuration and catalog errors

use super::GantryError;

/// Creates a configuration not found error
pub fn not_found(path: impl Into<String>) -> GantryError {
    GantryError::ConfigNotFound { path: path.into() }
}

/// Creates a configuration read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> GantryError {
    GantryError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a configuration parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> GantryError {
    GantryError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid configuration error
pub fn invalid(message: impl Into<String>) -> GantryError {
    GantryError::ConfigInvalid {
        message: message.into(),
    }
}
