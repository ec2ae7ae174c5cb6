//! Shared test utilities for E2E tests.
//!
//! A fixture is a temporary directory laid out as:
//!
//! ```text
//! <tmp>/bag8.yml          user configuration (data_paths, tmpfolder)
//! <tmp>/projects/<name>/  one directory per project, holding fig.yml
//! <tmp>/rendered/         tmpfolder receiving rendered manifests
//! <tmp>/work/             working directory of the command
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_project("busybox", manifests::BUSYBOX);
//!     fixture.command().args(["render", "busybox"]).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// Project manifests used across tests.
#[allow(dead_code)]
pub mod manifests {
    /// Project linking to `link` and carrying develop directives.
    pub const BUSYBOX: &str = r#"
app:
  image: bag8/busybox
  environment:
    - DUMMY=nothing here
  links:
    - link:link
  dev_environment:
    - DUMMY=yo
  dev_command: sleep 3600
"#;

    /// Leaf project.
    pub const LINK: &str = r#"
app:
  image: bag8/link
  domainname: link.example.org
"#;

    /// Project with a bundled internal service.
    pub const WITH_DB: &str = r#"
app:
  image: bag8/app
  links:
    - db
db:
  image: postgres
"#;

    pub const INVALID_YAML: &str = "app: [unclosed";
}

/// A temporary project tree plus configuration.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    compose_command: String,
}

impl TestFixture {
    pub fn new() -> Self {
        let fixture = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
            compose_command: "docker-compose".to_string(),
        };
        fixture
            .temp_dir
            .child("work")
            .create_dir_all()
            .expect("Failed to create work directory");
        fixture.write_config();
        fixture
    }

    /// Uses `command` as the compose executor.
    #[allow(dead_code)]
    pub fn with_compose_command(mut self, command: &str) -> Self {
        self.compose_command = command.to_string();
        self.write_config();
        self
    }

    /// Adds a project directory holding `manifest` as its fig.yml.
    pub fn with_project(self, name: &str, manifest: &str) -> Self {
        self.temp_dir
            .child("projects")
            .child(name)
            .child("fig.yml")
            .write_str(manifest)
            .expect("Failed to write manifest");
        self
    }

    /// Adds a Dockerfile to an existing project.
    #[allow(dead_code)]
    pub fn with_dockerfile(self, name: &str) -> Self {
        self.temp_dir
            .child("projects")
            .child(name)
            .child("Dockerfile")
            .write_str("FROM busybox\n")
            .expect("Failed to write Dockerfile");
        self
    }

    fn write_config(&self) {
        let config = format!(
            "data_paths:\n  - {}\ntmpfolder: {}\ncompose_command: {}\n",
            self.projects_dir().display(),
            self.rendered_dir().display(),
            self.compose_command
        );
        self.temp_dir
            .child("bag8.yml")
            .write_str(&config)
            .expect("Failed to write config file");
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("bag8.yml")
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.path().join("projects")
    }

    pub fn rendered_dir(&self) -> PathBuf {
        self.path().join("rendered")
    }

    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Command running in the work directory against this fixture's config.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("bag8");
        cmd.current_dir(self.path().join("work"))
            .env("BAG8_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let fixture = TestFixture::new().with_project("busybox", manifests::BUSYBOX);
        assert!(fixture.config_path().is_file());
        assert!(fixture.projects_dir().join("busybox").join("fig.yml").is_file());
        assert!(fixture.path().join("work").is_dir());
    }
}
