//! # Completions Command Implementation
//!
//! Generates shell completion scripts with `clap_complete`. The script covers
//! every subcommand and flag of the `bag8` binary, including the lifecycle
//! commands and their `--service` option.
//!
//! ## Supported Shells
//!
//! - Bash
//! - Zsh
//! - Fish
//! - PowerShell
//! - Elvish
//!
//! ## Usage
//!
//! ```bash
//! bag8 completions bash > ~/.local/share/bash-completion/completions/bag8
//! bag8 completions zsh > ~/.zfunc/_bag8
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Shell types for completion generation
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Fish Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish Shell
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::PowerShell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

/// Execute the `completions` command.
///
/// Generates shell completion scripts for the specified shell and writes them
/// to stdout. Redirect the output to the location your shell loads
/// completions from.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    write_completions(args.shell, &mut io::stdout());
    Ok(())
}

/// Writes the completion script for `shell` to `out`.
fn write_completions<W: io::Write>(shell: CompletionShell, out: &mut W) {
    let mut cmd = Cli::command();
    generate(Shell::from(shell), &mut cmd, "bag8", out);
}
