//! # Manifest Output
//!
//! Rendered manifests are written to `{temp_root}/{prefix}_{project}.yml`,
//! where the compose executor picks them up. Writes go through a temporary
//! file in the same directory which is then renamed over the destination, so
//! a reader never sees a half-written manifest.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::merge::MergedManifest;

/// Serializes merged manifests under a temp root.
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    temp_root: PathBuf,
}

impl ManifestWriter {
    pub fn new(temp_root: PathBuf) -> Self {
        Self { temp_root }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.tmpfolder.clone())
    }

    pub fn temp_root(&self) -> &Path {
        &self.temp_root
    }

    /// Deterministic output path for a project, creating the temp root.
    pub fn temp_path(&self, prefix: &str, simple_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.temp_root).map_err(|e| Error::Io(with_path(e, &self.temp_root)))?;
        Ok(self.temp_root.join(format!("{}_{}.yml", prefix, simple_name)))
    }

    /// Writes `manifest` to `path`, replacing any previous content.
    pub fn write(&self, manifest: &MergedManifest, path: &Path) -> Result<()> {
        write(manifest, path)
    }
}

/// Renders `manifest` as YAML text.
pub fn render(manifest: &MergedManifest) -> Result<String> {
    Ok(serde_yaml::to_string(manifest)?)
}

/// Atomically writes `manifest` to `path`.
pub fn write(manifest: &MergedManifest, path: &Path) -> Result<()> {
    let content = render(manifest)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| Error::Io(with_path(e, &dir)))?;

    let mut temp = NamedTempFile::new_in(&dir)?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;
    temp.persist(path)
        .map_err(|e| Error::Io(with_path(e.error, path)))?;

    debug!("Wrote merged manifest to {}", path.display());
    Ok(())
}

fn with_path(error: std::io::Error, path: &Path) -> std::io::Error {
    std::io::Error::new(error.kind(), format!("{}: {}", path.display(), error))
}
