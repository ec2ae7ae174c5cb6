//! # Projects Command Implementation
//!
//! Lists every project found under the search roots (the current directory,
//! then each configured `data_paths` entry). A project shadowed by one of
//! the same name in an earlier root is not listed.
//!
//! Each line shows the project's image, its internal services and whether it
//! ships an nginx `site.conf`. A project whose manifest cannot be read is
//! still listed, with a warning.

use anyhow::Result;
use clap::Args;
use log::warn;

use bag8::locator::ProjectEntry;
use bag8::project::Project;

use super::Context;

/// List the projects available under the search roots
#[derive(Args, Debug)]
pub struct ProjectsArgs {
    /// Print only project names
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `projects` command.
pub fn execute(args: ProjectsArgs, ctx: &Context) -> Result<()> {
    let entries = ctx.locator.available_projects()?;
    if entries.is_empty() && !args.quiet {
        println!("No projects found");
        return Ok(());
    }

    for entry in entries {
        if args.quiet {
            println!("{}", entry.name);
            continue;
        }
        let details = describe(&entry, ctx).join("  ");
        println!(
            "{}  {}  {}",
            ctx.output.project(&entry.name),
            details,
            ctx.output.dim(&entry.dir().display().to_string())
        );
    }
    Ok(())
}

/// Image, internal services and site configuration of one project.
fn describe(entry: &ProjectEntry, ctx: &Context) -> Vec<String> {
    let project = match Project::locate(&entry.name, &ctx.locator, &ctx.config) {
        Ok(project) => project,
        Err(e) => {
            warn!("Cannot locate {}: {}", entry.name, e);
            return vec!["-".to_string()];
        }
    };

    let mut details = match project.load_manifest() {
        Ok(manifest) => {
            let mut details = vec![manifest.image().unwrap_or("-").to_string()];
            let internal: Vec<&str> = manifest.internal_sections().collect();
            if !internal.is_empty() {
                details.push(format!("[services: {}]", internal.join(", ")));
            }
            details
        }
        Err(e) => {
            warn!("Cannot read manifest of {}: {}", entry.name, e);
            vec!["-".to_string()]
        }
    };
    if project.site_conf_path().is_some() {
        details.push("[site.conf]".to_string());
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use bag8::config::Config;
    use bag8::output::OutputConfig;
    use std::fs;
    use tempfile::TempDir;

    fn context(root: &TempDir) -> Context {
        let config = Config {
            data_paths: vec![root.path().to_path_buf()],
            ..Default::default()
        };
        Context::new(config, OutputConfig::from_env_and_flag("never"))
    }

    fn entry(root: &TempDir, name: &str) -> ProjectEntry {
        ProjectEntry {
            name: name.to_string(),
            root: root.path().to_path_buf(),
        }
    }

    #[test]
    fn test_describe_project() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("projects-web");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("fig.yml"),
            "app:\n  image: bag8/web\n  links: [pg]\npg:\n  image: postgres\n",
        )
        .unwrap();
        fs::write(dir.join("site.conf"), "server {}\n").unwrap();

        let details = describe(&entry(&root, "projects-web"), &context(&root));
        assert_eq!(details, vec!["bag8/web", "[services: pg]", "[site.conf]"]);
    }

    #[test]
    fn test_describe_unreadable_manifest() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("projects-broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("fig.yml"), "app: [unclosed").unwrap();

        let details = describe(&entry(&root, "projects-broken"), &context(&root));
        assert_eq!(details, vec!["-"]);
    }

    #[test]
    fn test_execute_with_missing_root() {
        let root = TempDir::new().unwrap();
        let config = Config {
            data_paths: vec![root.path().join("absent")],
            ..Default::default()
        };
        let ctx = Context::new(config, OutputConfig::from_env_and_flag("never"));
        assert!(execute(ProjectsArgs { quiet: true }, &ctx).is_ok());
    }
}
