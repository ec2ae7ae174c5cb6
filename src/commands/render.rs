//! # Render Command Implementation
//!
//! Prints the merged manifest of a project, or writes it to a file. This is a
//! read-only operation apart from the optional output file; nothing is sent
//! to the compose executor.
//!
//! With `--services` only the service keys are printed, each next to the
//! project that contributed it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use bag8::merge::{ManifestMerger, MergedManifest};
use bag8::project::Project;
use bag8::writer;

use super::{project_name, Context};

/// Render the merged manifest of a project
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Project to render (defaults to the current directory name)
    pub project: Option<String>,

    /// Write the manifest to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Apply develop-mode overrides
    #[arg(short, long)]
    pub develop: bool,

    /// Skip dependencies that cannot be found or parsed
    #[arg(long)]
    pub best_effort: bool,

    /// List service keys and their projects instead of the manifest
    #[arg(long, conflicts_with = "output")]
    pub services: bool,
}

/// Execute the `render` command.
pub fn execute(args: RenderArgs, ctx: &Context) -> Result<()> {
    let name = project_name(args.project)?;
    let project = Project::locate(&name, &ctx.locator, &ctx.config)?.with_develop(args.develop);

    let merged = ManifestMerger::new(&ctx.locator, &ctx.config)
        .best_effort(args.best_effort)
        .merge(&project)?;

    if args.services {
        for line in service_lines(&merged) {
            println!("{}", line);
        }
        return Ok(());
    }

    match args.output {
        Some(path) => {
            writer::write(&merged, &path)?;
            println!(
                "{}.yml was generated here: {}",
                ctx.output.project(&name),
                ctx.output.dim(&path.display().to_string())
            );
        }
        None => print!("{}", writer::render(&merged)?),
    }
    Ok(())
}

/// `service  project` pairs of a merged manifest, sorted by service.
fn service_lines(merged: &MergedManifest) -> Vec<String> {
    merged
        .keys()
        .map(|key| format!("{}  {}", key, merged.bag8_name(key).unwrap_or("-")))
        .collect()
}
