//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::commands::lifecycle::LifecycleArgs;
use bag8::compose::ComposeAction;

/// bag8 - Run trees of linked docker projects through compose
#[derive(Parser, Debug)]
#[command(name = "bag8")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Path to the user configuration file (defaults to ~/.config/bag8.yml)
    #[arg(long, global = true, value_name = "PATH", env = "BAG8_CONFIG")]
    config: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the merged manifest of a project
    Render(commands::render::RenderArgs),

    /// List the projects a project depends on, deepest first
    Deps(commands::deps::DepsArgs),

    /// Display the dependency tree of a project
    Tree(commands::tree::TreeArgs),

    /// List the projects available under the search roots
    Projects(commands::projects::ProjectsArgs),

    /// Create and start the containers of a project in the background
    Up(LifecycleArgs),

    /// Run a one-off container of the project's primary service
    Run(LifecycleArgs),

    /// Build the image of a project
    Build(LifecycleArgs),

    /// Start existing containers of a project
    Start(LifecycleArgs),

    /// Stop the containers of a project
    Stop(LifecycleArgs),

    /// Stop and remove the containers of a project
    Rm(LifecycleArgs),

    /// Show the logs of the project's primary service
    Logs(LifecycleArgs),

    /// Pull the images of a project and its dependencies
    Pull(LifecycleArgs),

    /// Push the image of a project
    Push(LifecycleArgs),

    /// Execute a command in the running primary container
    Exec(LifecycleArgs),

    /// Start a project in develop mode and open a shell in it
    Develop(LifecycleArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub fn execute(self) -> Result<i32> {
        init_logging(&self.log_level);

        let context = || commands::Context::load(self.config.as_deref(), &self.color);

        match self.command {
            Commands::Render(args) => commands::render::execute(args, &context()?).map(|_| 0),
            Commands::Deps(args) => commands::deps::execute(args, &context()?).map(|_| 0),
            Commands::Tree(args) => commands::tree::execute(args, &context()?).map(|_| 0),
            Commands::Projects(args) => commands::projects::execute(args, &context()?).map(|_| 0),
            Commands::Up(args) => commands::lifecycle::execute(ComposeAction::Up, args, &context()?),
            Commands::Run(args) => commands::lifecycle::execute(ComposeAction::Run, args, &context()?),
            Commands::Build(args) => {
                commands::lifecycle::execute(ComposeAction::Build, args, &context()?)
            }
            Commands::Start(args) => {
                commands::lifecycle::execute(ComposeAction::Start, args, &context()?)
            }
            Commands::Stop(args) => commands::lifecycle::execute(ComposeAction::Stop, args, &context()?),
            Commands::Rm(args) => commands::lifecycle::execute(ComposeAction::Rm, args, &context()?),
            Commands::Logs(args) => commands::lifecycle::execute(ComposeAction::Logs, args, &context()?),
            Commands::Pull(args) => commands::lifecycle::execute(ComposeAction::Pull, args, &context()?),
            Commands::Push(args) => commands::lifecycle::execute(ComposeAction::Push, args, &context()?),
            Commands::Exec(args) => commands::lifecycle::execute(ComposeAction::Exec, args, &context()?),
            Commands::Develop(args) => commands::lifecycle::develop(args, &context()?),
            Commands::Completions(args) => commands::completions::execute(args).map(|_| 0),
        }
    }
}

/// `RUST_LOG` wins over `--log-level` when set.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
