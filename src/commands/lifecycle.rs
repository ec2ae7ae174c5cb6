//! # Lifecycle Command Implementation
//!
//! `up`, `run`, `build`, `start`, `stop`, `rm`, `logs`, `pull`, `push` and
//! `exec` share this implementation. Each one:
//!
//! 1.  Locates the project and renders its merged manifest to
//!     `{tmpfolder}/{prefix}_{project}.yml`, unless `--reuseyml` is given and
//!     that file already exists.
//! 2.  Runs the compose executor against the file with the requested action,
//!     forwarding the arguments after `--`.
//!
//! The executor's exit code becomes bag8's exit code.
//!
//! `develop` chains two of them: `up` in develop mode, then `exec` into the
//! primary (or `--service`) container.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use log::info;

use bag8::compose::{ComposeAction, ComposeCommand};
use bag8::merge::ManifestMerger;
use bag8::project::Project;
use bag8::writer::ManifestWriter;

use super::{project_name, Context};

/// Arguments shared by every lifecycle command
#[derive(Args, Debug, Clone, Default)]
pub struct LifecycleArgs {
    /// Project to operate on (defaults to the current directory name)
    pub project: Option<String>,

    /// Compose project prefix (defaults to the configured prefix)
    #[arg(short, long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Service to target instead of the project's own (all services for
    /// up, start, stop, rm and pull)
    #[arg(short, long, value_name = "SERVICE")]
    pub service: Option<String>,

    /// Apply develop-mode overrides
    #[arg(short, long)]
    pub develop: bool,

    /// Reuse a previously rendered manifest if one exists
    #[arg(long)]
    pub reuseyml: bool,

    /// Skip dependencies that cannot be found or parsed
    #[arg(long)]
    pub best_effort: bool,

    /// Render the manifest and print the compose command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Extra arguments passed to the compose action
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Execute a lifecycle command, returning the compose exit code.
pub fn execute(action: ComposeAction, args: LifecycleArgs, ctx: &Context) -> Result<i32> {
    let (project, command) = prepare(&args, ctx)?;
    dispatch(&command, action, &project, &args)
}

/// Execute the `develop` command: `up` in develop mode, then `exec`.
pub fn develop(args: LifecycleArgs, ctx: &Context) -> Result<i32> {
    let args = LifecycleArgs {
        develop: true,
        ..args
    };
    let (project, command) = prepare(&args, ctx)?;

    // `up` starts every service; only `exec` honours --service and ARGS.
    let up_args = LifecycleArgs {
        service: None,
        args: Vec::new(),
        ..args.clone()
    };
    let code = dispatch(&command, ComposeAction::Up, &project, &up_args)?;
    if code != 0 {
        return Ok(code);
    }
    dispatch(&command, ComposeAction::Exec, &project, &args)
}

fn prepare(args: &LifecycleArgs, ctx: &Context) -> Result<(Project, ComposeCommand)> {
    let name = project_name(args.project.clone())?;
    let project = Project::locate(&name, &ctx.locator, &ctx.config)?
        .with_prefix(args.prefix.clone())
        .with_develop(args.develop);

    let path = prepare_manifest(&project, args, ctx)?;
    let command = ComposeCommand::new(
        ctx.config.compose_command.as_str(),
        path,
        project.prefix.as_str(),
    );
    Ok((project, command))
}

fn dispatch(
    command: &ComposeCommand,
    action: ComposeAction,
    project: &Project,
    args: &LifecycleArgs,
) -> Result<i32> {
    let primary = project.service_name();
    let service = args.service.as_deref();

    if args.dry_run {
        println!("{}", command.display(action, primary, service, &args.args));
        return Ok(0);
    }

    info!("Running {} for {}", action, project.bag8_name);
    Ok(command.run(action, primary, service, &args.args)?)
}

/// Renders the manifest of `project` to its temp path, honouring
/// `--reuseyml`.
pub fn prepare_manifest(project: &Project, args: &LifecycleArgs, ctx: &Context) -> Result<PathBuf> {
    let writer = ManifestWriter::from_config(&ctx.config);
    let path = writer.temp_path(&project.prefix, &project.simple_name)?;

    if args.reuseyml && path.is_file() {
        info!("Reusing {}", path.display());
        return Ok(path);
    }

    let merged = ManifestMerger::new(&ctx.locator, &ctx.config)
        .best_effort(args.best_effort)
        .merge(project)?;
    writer.write(&merged, &path)?;

    println!(
        "{}.yml was generated here: {}",
        ctx.output.project(&project.simple_name),
        ctx.output.dim(&path.display().to_string())
    );
    Ok(path)
}
