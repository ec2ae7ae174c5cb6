//! # CLI Command Implementations
//!
//! Each subcommand of `bag8` lives in its own file with:
//! - An `Args` struct, derived using `clap`.
//! - An `execute` function taking the parsed `Args` and the shared
//!   [`Context`].
//!
//! The lifecycle subcommands (`up`, `run`, `stop`, ...) share one
//! implementation in `lifecycle`, parameterized by the compose action.

pub mod completions;
pub mod deps;
pub mod lifecycle;
pub mod projects;
pub mod render;
pub mod tree;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use bag8::config::Config;
use bag8::defaults::default_config_path;
use bag8::locator::ProjectLocator;
use bag8::output::OutputConfig;

/// State shared by every command: configuration loaded once at startup.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub locator: ProjectLocator,
    pub output: OutputConfig,
}

impl Context {
    /// Loads the configuration from `config_path` (or the default location).
    pub fn load(config_path: Option<&Path>, color: &str) -> Result<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);
        let config = Config::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        Ok(Self::new(config, OutputConfig::from_env_and_flag(color)))
    }

    pub fn new(config: Config, output: OutputConfig) -> Self {
        let locator = ProjectLocator::from_config(&config);
        Self {
            config,
            locator,
            output,
        }
    }
}

/// The project named on the command line, or the current directory's name.
pub fn project_name(arg: Option<String>) -> Result<String> {
    if let Some(name) = arg {
        return Ok(name);
    }
    let cwd: PathBuf = std::env::current_dir().context("Failed to get current directory")?;
    cwd.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Cannot derive a project name from {}", cwd.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_project_name() {
        assert_eq!(project_name(Some("busybox".to_string())).unwrap(), "busybox");
    }

    #[test]
    fn test_context_load_missing_config_uses_defaults() {
        let context = Context::load(Some(Path::new("/nonexistent/bag8.yml")), "never").unwrap();
        assert_eq!(context.config, Config::default());
        assert!(!context.output.use_color);
        assert_eq!(context.locator.roots()[0], PathBuf::from("."));
    }

    #[test]
    fn test_context_load_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bag8.yml");
        std::fs::write(&path, "data_paths: 12\n").unwrap();

        let err = Context::load(Some(&path), "never").unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
