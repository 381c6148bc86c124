use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    gantry completions bash > ~/.bash_completion.d/gantry\n\n\
                  Generate zsh completions:\n    gantry completions zsh > ~/.zfunc/_gantry\n\n\
                  Generate PowerShell completions:\n    gantry completions powershell >> $PROFILE")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
