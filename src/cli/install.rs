use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install one item:\n    gantry install firefox\n\n\
                   Install several items in order:\n    gantry install firefox 7zip\n\n\
                   Use a different cache:\n    gantry --cache-dir D:\\cache install firefox")]
pub struct InstallArgs {
    /// Catalog item names, installed in the given order
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,
}
