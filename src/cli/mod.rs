//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - uninstall: Uninstall command arguments
//! - run: Manifest run arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod install;
pub mod run;
pub mod uninstall;

pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use run::RunArgs;
pub use uninstall::UninstallArgs;

/// Gantry - software deployment agent
///
/// Installs and removes catalog items from verified, locally cached artifacts.
#[derive(Parser, Debug)]
#[command(
    name = "gantry",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Client-side software deployment agent",
    long_about = "Gantry installs and uninstalls catalog items on this machine. Each installer \
                  artifact is fetched from the repository into a local cache, verified against \
                  the catalog digest, and handed to the matching installer (MSI or Chocolatey).",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  gantry install firefox 7zip          \x1b[90m# Install catalog items\x1b[0m\n   \
                  gantry uninstall 7zip                \x1b[90m# Uninstall a catalog item\x1b[0m\n   \
                  gantry run                           \x1b[90m# Apply the configured manifest\x1b[0m\n   \
                  gantry --keep-going run              \x1b[90m# Do not stop at the first failure\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Agent configuration file
    #[arg(long, short = 'c', global = true, env = "GANTRY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Artifact cache directory (overrides the configured cache_path)
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Enable verbose output, including installer output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Keep processing remaining items after a failure
    #[arg(long, short = 'k', global = true)]
    pub keep_going: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install catalog items
    Install(InstallArgs),

    /// Uninstall catalog items
    Uninstall(UninstallArgs),

    /// Apply a manifest of managed installs and uninstalls
    Run(RunArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
