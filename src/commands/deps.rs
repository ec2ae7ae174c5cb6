//! # Deps Command Implementation
//!
//! Lists the projects a project depends on, one per line, in the order they
//! are folded into the merged manifest (deepest first).

use anyhow::Result;
use clap::Args;

use bag8::deps::DependencyResolver;

use super::{project_name, Context};

/// List the dependencies of a project
#[derive(Args, Debug)]
pub struct DepsArgs {
    /// Project to inspect (defaults to the current directory name)
    pub project: Option<String>,

    /// Skip dependencies that cannot be found or parsed
    #[arg(long)]
    pub best_effort: bool,
}

/// Execute the `deps` command.
pub fn execute(args: DepsArgs, ctx: &Context) -> Result<()> {
    let name = project_name(args.project)?;
    for dep in dependencies(&name, args.best_effort, ctx)? {
        println!("{}", ctx.output.project(&dep));
    }
    Ok(())
}

fn dependencies(name: &str, best_effort: bool, ctx: &Context) -> Result<Vec<String>> {
    Ok(DependencyResolver::new(&ctx.locator)
        .best_effort(best_effort)
        .resolve_deps(name)?)
}
