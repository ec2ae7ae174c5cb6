//! # Projects
//!
//! A `Project` is the per-invocation handle on a named project: its raw name
//! as typed by the user or found in a link (`bag8_name`), the sanitized name
//! used as service key and DNS label (`simple_name`), the compose prefix it
//! runs under, and whether it runs in develop mode.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::defaults::{APP_SECTION, MANIFEST_FILE};
use crate::error::Result;
use crate::locator::ProjectDirectoryResolver;
use crate::manifest::Manifest;
use crate::name::simplify;

/// A located project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub bag8_name: String,
    pub simple_name: String,
    /// Compose project prefix (`-p`).
    pub prefix: String,
    pub develop: bool,
    dir: PathBuf,
}

impl Project {
    /// Locates `name` through `resolver`, using the configured prefix.
    pub fn locate<R: ProjectDirectoryResolver + ?Sized>(
        name: &str,
        resolver: &R,
        config: &Config,
    ) -> Result<Self> {
        let manifest_path = resolver.locate(name)?;
        let dir = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self {
            bag8_name: name.to_string(),
            simple_name: simplify(name),
            prefix: config.prefix.clone(),
            develop: false,
            dir,
        })
    }

    /// Overrides the configured prefix when `prefix` is given.
    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        if let Some(prefix) = prefix {
            self.prefix = prefix;
        }
        self
    }

    pub fn with_develop(mut self, develop: bool) -> Self {
        self.develop = develop;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    pub fn load_manifest(&self) -> Result<Manifest> {
        Manifest::from_file(&self.bag8_name, self.manifest_path())
    }

    /// Optional nginx site configuration shipped with the project.
    pub fn site_conf_path(&self) -> Option<PathBuf> {
        let path = self.dir.join("site.conf");
        path.is_file().then_some(path)
    }

    /// Service key of the primary section in merged manifests.
    pub fn service_name(&self) -> &str {
        &self.simple_name
    }

    /// Whether `section` is the primary section of this project's manifest.
    pub fn is_app_section(section: &str) -> bool {
        section == APP_SECTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::DOCKERFILE;
    use crate::error::Error;
    use crate::locator::ProjectLocator;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ProjectLocator) {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("link.2");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST_FILE), "app:\n  image: bag8/busybox\n").unwrap();
        fs::write(dir.join(DOCKERFILE), "FROM busybox\n").unwrap();
        let locator = ProjectLocator::new(vec![root.path().to_path_buf()]);
        (root, locator)
    }

    #[test]
    fn test_locate_project() {
        let (root, locator) = setup();
        let project = Project::locate("link.2", &locator, &Config::default()).unwrap();

        assert_eq!(project.bag8_name, "link.2");
        assert_eq!(project.simple_name, "link2");
        assert_eq!(project.prefix, "bag8");
        assert!(!project.develop);
        assert_eq!(project.dir(), root.path().join("link.2"));
        assert_eq!(
            project.load_manifest().unwrap().image(),
            Some("bag8/busybox")
        );
    }

    #[test]
    fn test_locate_unknown_project() {
        let (_root, locator) = setup();
        let err = Project::locate("ghost", &locator, &Config::default()).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound { .. }));
    }

    #[test]
    fn test_prefix_and_develop_overrides() {
        let (_root, locator) = setup();
        let project = Project::locate("link.2", &locator, &Config::default())
            .unwrap()
            .with_prefix(Some("ci-42".to_string()))
            .with_develop(true);

        assert_eq!(project.prefix, "ci-42");
        assert!(project.develop);

        let unchanged = project.clone().with_prefix(None);
        assert_eq!(unchanged.prefix, "ci-42");
    }

    #[test]
    fn test_site_conf() {
        let (root, locator) = setup();
        let project = Project::locate("link.2", &locator, &Config::default()).unwrap();

        assert_eq!(project.site_conf_path(), None);

        fs::write(root.path().join("link.2").join("site.conf"), "server {}\n").unwrap();
        assert!(project.site_conf_path().is_some());
    }
}
