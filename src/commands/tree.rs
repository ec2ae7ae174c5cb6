//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the link
//! graph of a project in a hierarchical format.
//!
//! ## Functionality
//!
//! - **Dependency Visualization**: each project is shown under the projects
//!   linking to it; shared dependencies appear once per parent
//! - **Depth Control**: Supports `--depth` flag to limit tree depth
//! - **Missing Projects**: in best-effort mode unresolvable links are shown
//!   and marked instead of aborting
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};

use bag8::deps::{DependencyNode, DependencyResolver};

use super::{project_name, Context};

/// Display the dependency tree of a project
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Project to inspect (defaults to the current directory name)
    pub project: Option<String>,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the project itself, 1 to show its direct links, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,

    /// Show unresolvable links instead of failing
    #[arg(long)]
    pub best_effort: bool,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs, ctx: &Context) -> Result<()> {
    let name = project_name(args.project)?;
    let root = DependencyResolver::new(&ctx.locator)
        .best_effort(args.best_effort)
        .dependency_tree(&name)?;

    let tree_root = build_tree_node(&root, args.depth.unwrap_or(usize::MAX), 0);
    print_tree(&tree_root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;

    Ok(())
}

/// Build a display node from a dependency node
fn build_tree_node(node: &DependencyNode, max_depth: usize, current_depth: usize) -> TreeNode {
    let label = if node.missing {
        format!("{} (not found)", node.name)
    } else {
        node.name.clone()
    };

    let children = if current_depth >= max_depth {
        vec![]
    } else {
        node.children
            .iter()
            .map(|child| build_tree_node(child, max_depth, current_depth + 1))
            .collect()
    };
    TreeNode { label, children }
}

/// Tree node structure for ptree visualization
#[derive(Clone, Debug)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
