//! Default values for bag8 configuration.
//!
//! This module provides centralized default values used across the library
//! and the commands, ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Manifest file expected in every project directory.
pub const MANIFEST_FILE: &str = "fig.yml";

/// Dockerfile name looked up for buildable projects.
pub const DOCKERFILE: &str = "Dockerfile";

/// Name of the primary section of a manifest.
pub const APP_SECTION: &str = "app";

pub const DEFAULT_ACCOUNT: &str = "bag8";
pub const DEFAULT_PREFIX: &str = "bag8";
pub const DEFAULT_DOMAIN_SUFFIX: &str = "docker";
pub const DEFAULT_COMPOSE_COMMAND: &str = "docker-compose";

/// Returns the default user configuration file path.
///
/// Resolves to `~/.config/bag8.yml` on every platform, matching where
/// existing setups keep their file. Falls back to `bag8.yml` in the current
/// directory if the home directory cannot be determined.
///
/// This can be overridden by the `--config` CLI flag or the `BAG8_CONFIG`
/// environment variable.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".config").join("bag8.yml"))
        .unwrap_or_else(|| PathBuf::from("bag8.yml"))
}

/// Returns the default directory for rendered manifests (`~/.local/bag8`).
pub fn default_temp_root() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".local").join("bag8"))
        .unwrap_or_else(|| PathBuf::from(".bag8"))
}
