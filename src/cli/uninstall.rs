use clap::Parser;

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Uninstall an item:\n    gantry uninstall 7zip\n\n\
                  Uninstall several items, continuing past failures:\n    gantry --keep-going uninstall 7zip firefox")]
pub struct UninstallArgs {
    /// Catalog item names, uninstalled in the given order
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,
}
