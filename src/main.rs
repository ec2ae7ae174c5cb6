//! # bag8 CLI
//!
//! This is the binary entry point for the `bag8` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Turning errors and compose exit codes into the process exit status.
//!
//! Manifest resolution lives in the `lib.rs` library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let code = cli.execute()?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
