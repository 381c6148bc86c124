use clap::Parser;
use std::path::PathBuf;

/// Arguments for the run command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Apply the manifest named in the config:\n    gantry run\n\n\
                  Apply a specific manifest:\n    gantry run --manifest ./lab-machines.yaml")]
pub struct RunArgs {
    /// Manifest file (defaults to the configured manifest)
    #[arg(long, short = 'm')]
    pub manifest: Option<PathBuf>,
}
