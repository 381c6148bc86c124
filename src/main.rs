//! Gantry - software deployment agent
//!
//! Installs and uninstalls catalog items on the local machine from artifacts that
//! are cached locally and verified against the catalog digest before any
//! installer runs.

use clap::Parser;

mod cache;
mod catalog;
mod cli;
mod commands;
mod config;
mod error;
mod fetch;
mod hash;
mod installer;
mod operations;
mod output;
mod process;
mod progress;
mod status;
mod verify;

use cli::{Cli, Commands};
use commands::context::GlobalOptions;

/// Diagnostic logging: warn by default, debug with `--verbose`; `RUST_LOG` wins
///
/// Without `RUST_LOG` the logger accepts debug and the global max level gates it,
/// so `verbose: true` in the config file can raise it once the config is read.
fn init_logging(verbose: bool) {
    let explicit = std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format_timestamp(None)
        .init();

    if !explicit && !verbose {
        log::set_max_level(log::LevelFilter::Warn);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = GlobalOptions {
        config: cli.config,
        cache_dir: cli.cache_dir,
        verbose: cli.verbose,
        keep_going: cli.keep_going,
    };

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(&options, args),
        Commands::Uninstall(args) => commands::uninstall::run(&options, args),
        Commands::Run(args) => commands::run::run(&options, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
