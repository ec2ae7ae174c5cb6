//! # Project Location
//!
//! A project is a directory holding a `fig.yml` manifest and, when it has a
//! buildable image, a `Dockerfile`. Projects live directly under one of an
//! ordered list of search roots: the current directory first, then the
//! configured `data_paths`. The first root containing the project wins; roots
//! are never merged.
//!
//! The merge engine only talks to the [`ProjectDirectoryResolver`] trait, so
//! it can be driven by something other than the filesystem scan implemented
//! by [`ProjectLocator`].

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::Config;
use crate::defaults::{DOCKERFILE, MANIFEST_FILE};
use crate::error::{Error, Result};

/// Maps project names to their directories.
pub trait ProjectDirectoryResolver {
    /// Directory of the project called `name`, if it has a manifest.
    fn find(&self, name: &str) -> Option<PathBuf>;

    /// Whether `dir` contains a Dockerfile.
    fn has_dockerfile(&self, dir: &Path) -> bool {
        dir.join(DOCKERFILE).is_file()
    }

    /// Hint appended to `ProjectNotFound` errors.
    fn search_hint(&self) -> Option<String> {
        None
    }

    /// Path of the project's manifest.
    fn locate(&self, name: &str) -> Result<PathBuf> {
        self.find(name)
            .map(|dir| dir.join(MANIFEST_FILE))
            .ok_or_else(|| Error::ProjectNotFound {
                project: name.to_string(),
                hint: self.search_hint(),
            })
    }

    /// Path of the project's Dockerfile.
    ///
    /// Fails with `NoDockerfile` when the project exists without one, and with
    /// `ProjectNotFound` when the project does not exist at all.
    fn locate_dockerfile(&self, name: &str) -> Result<PathBuf> {
        match self.find(name) {
            Some(dir) if self.has_dockerfile(&dir) => Ok(dir.join(DOCKERFILE)),
            Some(dir) => Err(Error::NoDockerfile {
                project: name.to_string(),
                dir,
            }),
            None => Err(Error::ProjectNotFound {
                project: name.to_string(),
                hint: self.search_hint(),
            }),
        }
    }
}

/// A project found while scanning the search roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub name: String,
    pub root: PathBuf,
}

impl ProjectEntry {
    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }
}

/// Filesystem-backed resolver scanning an ordered list of roots.
#[derive(Debug, Clone)]
pub struct ProjectLocator {
    roots: Vec<PathBuf>,
}

impl ProjectLocator {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.search_roots())
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Every project under the search roots, sorted by name within a root.
    /// A name present in several roots is reported for the first one only.
    pub fn available_projects(&self) -> Result<Vec<ProjectEntry>> {
        let mut entries: Vec<ProjectEntry> = Vec::new();
        for root in &self.roots {
            let read_dir = match fs::read_dir(root) {
                Ok(read_dir) => read_dir,
                Err(e) => {
                    debug!("Skipping search root {}: {}", root.display(), e);
                    continue;
                }
            };

            let mut names = Vec::new();
            for entry in read_dir {
                let entry = entry?;
                if !entry.path().join(MANIFEST_FILE).is_file() {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
            names.sort();

            for name in names {
                if entries.iter().any(|e| e.name == name) {
                    continue;
                }
                entries.push(ProjectEntry {
                    name,
                    root: root.clone(),
                });
            }
        }
        Ok(entries)
    }
}

impl ProjectDirectoryResolver for ProjectLocator {
    fn find(&self, name: &str) -> Option<PathBuf> {
        if !is_plain_name(name) {
            return None;
        }
        self.roots
            .iter()
            .map(|root| root.join(name))
            .find(|dir| dir.join(MANIFEST_FILE).is_file())
    }

    fn search_hint(&self) -> Option<String> {
        let roots: Vec<String> = self.roots.iter().map(|r| r.display().to_string()).collect();
        Some(format!("searched: {}", roots.join(", ")))
    }
}

/// Project names are single path components.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}
