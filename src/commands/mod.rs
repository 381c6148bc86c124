//! Command implementations for the gantry CLI

pub mod completions;
pub mod context;
pub mod install;
pub mod run;
pub mod uninstall;
pub mod version;
