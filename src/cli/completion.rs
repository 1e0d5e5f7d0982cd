//! Bash completion glue
//!
//! The generated script calls back into `gvs completion __complete <cur> <prev>`
//! and feeds the printed words to `compgen`.

use std::io::Write;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::App;

const SUBCOMMANDS: &[&str] = &["list", "list-remote", "install", "use", "remove", "completion"];

const EXECUTABLE_PLACEHOLDER: &str = "@@GVS_EXECUTABLE@@";

const BASH_SCRIPT: &str = r#"_gvs_completions() {
    local cur prev words
    cur="${COMP_WORDS[COMP_CWORD]}"
    prev="${COMP_WORDS[COMP_CWORD-1]}"

    words=$(@@GVS_EXECUTABLE@@ completion __complete "${cur}" "${prev}")

    COMPREPLY=($(compgen -W "${words}" -- "${cur}"))
}

complete -F _gvs_completions gvs
"#;

#[derive(Debug, Subcommand)]
pub enum CompletionCommand {
    /// Print the bash completion script
    Bash,
    /// Print completion candidates for the word being typed
    #[command(name = "__complete", hide = true)]
    Complete {
        #[arg(default_value = "", allow_hyphen_values = true)]
        current: String,
        #[arg(default_value = "", allow_hyphen_values = true)]
        previous: String,
    },
}

pub fn run(app: &App, command: CompletionCommand, out: &mut impl Write) -> Result<()> {
    match command {
        CompletionCommand::Bash => {
            let executable = std::env::current_exe()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|_| "gvs".to_string());
            write!(out, "{}", bash_script(&executable))?;
        }
        CompletionCommand::Complete { current, previous } => {
            for word in candidates(app, &current, &previous) {
                writeln!(out, "{word}")?;
            }
        }
    }

    Ok(())
}

pub fn bash_script(executable: &str) -> String {
    BASH_SCRIPT.replace(EXECUTABLE_PLACEHOLDER, executable)
}

/// Words completing `current` given the previous word. Errors yield nothing.
pub fn candidates(app: &App, current: &str, previous: &str) -> Vec<String> {
    match previous {
        "use" | "remove" => app
            .registry()
            .list_installed()
            .unwrap_or_default()
            .into_iter()
            .map(|v| v.to_string())
            .filter(|v| v.starts_with(current))
            .collect(),
        "gvs" => SUBCOMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(current))
            .map(|cmd| cmd.to_string())
            .collect(),
        _ => Vec::new(),
    }
}
