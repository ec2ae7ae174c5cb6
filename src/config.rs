//! # User Configuration
//!
//! This module defines the process-wide settings read from the user
//! configuration file (`~/.config/bag8.yml` by default). The file is loaded
//! once at startup and the resulting `Config` value is passed by reference to
//! the locator, the merger and the commands; nothing re-reads it mid-run.
//!
//! Every key is optional. A missing file yields the documented defaults:
//!
//! ```yaml
//! account: bag8
//! domain_suffix: docker
//! prefix: bag8
//! registry: null
//! data_paths: []
//! tmpfolder: ~/.local/bag8
//! compose_command: docker-compose
//! ```
//!
//! Unknown keys are ignored so that configuration files shared with older
//! tooling (DNS or nginx settings, `insecure_registry`) keep loading. Registry
//! trust is configured in the docker daemon, not here.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

/// Settings consumed by the resolution engine and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Image namespace on the registry.
    pub account: String,
    /// Suffix appended to generated DNS aliases (`busybox.docker`).
    pub domain_suffix: String,
    /// Compose project prefix used when none is given on the command line.
    pub prefix: String,
    /// Registry host prepended to image names, if any.
    pub registry: Option<String>,
    /// Extra directories searched for projects after the current directory.
    pub data_paths: Vec<PathBuf>,
    /// Directory receiving rendered manifests.
    pub tmpfolder: PathBuf,
    /// Program invoked to run rendered manifests.
    pub compose_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account: defaults::DEFAULT_ACCOUNT.to_string(),
            domain_suffix: defaults::DEFAULT_DOMAIN_SUFFIX.to_string(),
            prefix: defaults::DEFAULT_PREFIX.to_string(),
            registry: None,
            data_paths: Vec::new(),
            tmpfolder: defaults::default_temp_root(),
            compose_command: defaults::DEFAULT_COMPOSE_COMMAND.to_string(),
        }
    }
}

impl Config {
    /// Parses a configuration from YAML text.
    ///
    /// An empty document is accepted and yields the defaults.
    pub fn parse(yaml_content: &str) -> Result<Self> {
        if yaml_content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Config = serde_yaml::from_str(yaml_content).map_err(|e| Error::Config {
            message: e.to_string(),
        })?;
        config.tmpfolder = expand_home(&config.tmpfolder);
        config.data_paths = config.data_paths.iter().map(|p| expand_home(p)).collect();
        Ok(config)
    }

    /// Loads the configuration file at `path`, falling back to defaults when
    /// it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(
                "No config found at {}, using default values",
                path.display()
            );
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::parse(&content)
    }

    /// Project search roots: the current directory first, then `data_paths`.
    pub fn search_roots(&self) -> Vec<PathBuf> {
        std::iter::once(PathBuf::from("."))
            .chain(self.data_paths.iter().cloned())
            .collect()
    }

    /// Full image reference for a project, honouring registry and account.
    pub fn image_name(&self, project: &str, tag: &str) -> String {
        match (&self.registry, self.account.is_empty()) {
            (Some(registry), false) => format!("{}/{}/{}:{}", registry, self.account, project, tag),
            (_, false) => format!("{}/{}:{}", self.account, project, tag),
            (_, true) => format!("{}:{}", project, tag),
        }
    }
}

/// Expands a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.prefix, "bag8");
        assert_eq!(config.domain_suffix, "docker");
        assert_eq!(config.compose_command, "docker-compose");
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
domain_suffix: local
prefix: dev
data_paths:
  - /srv/projects
"#;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.domain_suffix, "local");
        assert_eq!(config.prefix, "dev");
        assert_eq!(config.account, "bag8");
        assert_eq!(
            config.search_roots(),
            vec![PathBuf::from("."), PathBuf::from("/srv/projects")]
        );
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let yaml = "docker_ip: 172.17.42.1\ndnsdock_image: tonistiigi/dnsdock\ninsecure_registry: true\n";
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.prefix, "bag8");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("data_paths: 12");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_tmpfolder_home_expansion() {
        let config = Config::parse("tmpfolder: ~/rendered").unwrap();
        assert!(config.tmpfolder.ends_with("rendered"));
        if dirs::home_dir().is_some() {
            assert!(!config.tmpfolder.starts_with("~"));
        }
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let config = Config::load("/nonexistent/bag8.yml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bag8.yml");
        fs::write(&path, "account: acme\nregistry: registry.example.com\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.account, "acme");
        assert_eq!(config.registry.as_deref(), Some("registry.example.com"));
    }

    #[test]
    fn test_image_name_variants() {
        let mut config = Config::default();
        assert_eq!(config.image_name("busybox", "latest"), "bag8/busybox:latest");

        config.registry = Some("registry.example.com".to_string());
        assert_eq!(
            config.image_name("busybox", "1.0"),
            "registry.example.com/bag8/busybox:1.0"
        );

        config.account = String::new();
        assert_eq!(config.image_name("busybox", "1.0"), "busybox:1.0");
    }
}
