//! # Manifest Merging
//!
//! This module turns a project and all of its dependencies into a single
//! compose manifest.
//!
//! ## Process
//!
//! 1.  **Customization**: every section of a project manifest gets its merge
//!     key (the project's simple name for `app`, the section name otherwise)
//!     and the service-discovery variables:
//!     - `DNSDOCK_ALIAS`: `domainname`, or `{key}.{domain_suffix}`, unless the
//!       section already sets it;
//!     - `DNSDOCK_IMAGE`: always empty, filled in by external tooling;
//!     - `BAG8_LINKS`: the names the section's links are reachable under.
//!
//! 2.  **Folding**: dependencies are folded deepest-first into a fresh
//!     manifest, then the requested project itself. Later sections replace
//!     earlier ones with the same key, so the requested project always owns
//!     its own entry.
//!
//! 3.  **Finishing** the requested project's `app` entry: link targets are
//!     rewritten to simple names (aliases untouched), develop overrides are
//!     applied in develop mode, develop-only directives are stripped from every
//!     section, and a `build` entry is attached when the project has a
//!     Dockerfile. A buildable `app` without an `image` is tagged with the
//!     configured registry/account image name so it can be pushed.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};
use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Value as YamlValue};

use crate::config::Config;
use crate::defaults::{APP_SECTION, DOCKERFILE};
use crate::deps::DependencyResolver;
use crate::error::{Error, Result};
use crate::locator::ProjectDirectoryResolver;
use crate::manifest::{self, Manifest, Section};
use crate::name::{simplify, simplify_link};
use crate::project::Project;
use crate::template::interpolate;

pub const DNSDOCK_ALIAS: &str = "DNSDOCK_ALIAS";
pub const DNSDOCK_IMAGE: &str = "DNSDOCK_IMAGE";
pub const BAG8_LINKS: &str = "BAG8_LINKS";

/// A merged compose manifest.
///
/// Serializes as a plain mapping of service key to section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedManifest {
    sections: BTreeMap<String, Section>,
    /// Service key -> raw name of the project that contributed it.
    bag8_names: BTreeMap<String, String>,
    /// Simple name -> raw name of every project folded so far.
    projects: BTreeMap<String, String>,
}

impl MergedManifest {
    /// Folds one project's customized sections in, replacing same-keyed
    /// entries.
    pub fn fold(mut self, bag8_name: &str, sections: Vec<(String, Section)>) -> Result<Self> {
        let simple_name = simplify(bag8_name);
        match self.projects.get(&simple_name) {
            Some(first) if first != bag8_name => {
                return Err(Error::DuplicateSimpleName {
                    simple_name,
                    first: first.clone(),
                    second: bag8_name.to_string(),
                })
            }
            _ => {
                self.projects.insert(simple_name, bag8_name.to_string());
            }
        }

        for (key, section) in sections {
            self.bag8_names.insert(key.clone(), bag8_name.to_string());
            self.sections.insert(key, section);
        }
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&Section> {
        self.sections.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Section> {
        self.sections.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.sections.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Raw name of the project that contributed `key`.
    pub fn bag8_name(&self, key: &str) -> Option<&str> {
        self.bag8_names.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Serialize for MergedManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.sections.serialize(serializer)
    }
}

/// Builds merged manifests for projects found through a resolver.
pub struct ManifestMerger<'a, R: ProjectDirectoryResolver + ?Sized> {
    resolver: &'a R,
    config: &'a Config,
    best_effort: bool,
    env: HashMap<String, String>,
}

impl<'a, R: ProjectDirectoryResolver + ?Sized> ManifestMerger<'a, R> {
    /// Creates a merger interpolating `dev_volumes` against the current
    /// process environment.
    pub fn new(resolver: &'a R, config: &'a Config) -> Self {
        Self {
            resolver,
            config,
            best_effort: false,
            env: std::env::vars().collect(),
        }
    }

    /// Replaces the variables used for `dev_volumes` interpolation.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Skip dependencies that cannot be found or parsed, with a warning,
    /// instead of failing the merge.
    pub fn best_effort(mut self, best_effort: bool) -> Self {
        self.best_effort = best_effort;
        self
    }

    /// Merges `project` and all its dependencies.
    pub fn merge(&self, project: &Project) -> Result<MergedManifest> {
        let own = project.load_manifest()?;
        own.require_app(&project.bag8_name)?;

        let deps = DependencyResolver::new(self.resolver)
            .best_effort(self.best_effort)
            .resolve_deps(&project.bag8_name)?;
        debug!("Dependencies of {}: {:?}", project.bag8_name, deps);

        let mut merged = MergedManifest::default();
        for dep in &deps {
            match manifest::load(self.resolver, dep) {
                Ok(dep_manifest) => {
                    merged = merged.fold(dep, self.customize(dep, dep_manifest))?;
                }
                Err(e) if self.best_effort && e.is_recoverable() => {
                    warn!("Skipping {} in manifest of {}: {}", dep, project.bag8_name, e);
                }
                Err(e) => return Err(e),
            }
        }
        merged = merged.fold(&project.bag8_name, self.customize(&project.bag8_name, own))?;

        self.finish(project, merged)
    }

    /// Keys one project's sections and injects the discovery variables.
    pub fn customize(&self, bag8_name: &str, manifest: Manifest) -> Vec<(String, Section)> {
        let simple_name = simplify(bag8_name);
        manifest
            .into_sections()
            .map(|(key, mut section)| {
                let name = if Project::is_app_section(&key) {
                    simple_name.clone()
                } else {
                    key
                };

                if !section.environment.contains_key(DNSDOCK_ALIAS) {
                    let alias = section
                        .domainname
                        .clone()
                        .unwrap_or_else(|| format!("{}.{}", name, self.config.domain_suffix));
                    section.environment.insert(DNSDOCK_ALIAS, alias);
                }
                section.environment.insert(DNSDOCK_IMAGE, "");
                let links = section.link_names().join(" ");
                section.environment.insert(BAG8_LINKS, links);

                (name, section)
            })
            .collect()
    }

    fn finish(&self, project: &Project, mut merged: MergedManifest) -> Result<MergedManifest> {
        let app_key = project.simple_name.as_str();
        let missing_app = || Error::MalformedManifest {
            project: project.bag8_name.clone(),
            message: format!("missing '{}' section", APP_SECTION),
        };

        let app = merged.get_mut(app_key).ok_or_else(missing_app)?;
        app.links = app.links.iter().map(|link| simplify_link(link)).collect();
        if project.develop {
            apply_develop(app, &self.env)?;
        }

        for section in merged.sections.values_mut() {
            section.strip_dev_directives();
        }

        let app = merged.get_mut(app_key).ok_or_else(missing_app)?;
        if app.build.is_none() {
            match self.resolver.locate_dockerfile(&project.bag8_name) {
                Ok(dockerfile) => {
                    app.build = Some(build_entry(&dockerfile));
                    if app.image.is_none() {
                        app.image = Some(self.config.image_name(&project.simple_name, "latest"));
                    }
                }
                Err(Error::NoDockerfile { .. }) => {
                    debug!("{} has no Dockerfile, not attaching a build", project.bag8_name);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(merged)
    }
}

/// Applies `dev_volumes`, `dev_environment` and `dev_command` to `section`.
fn apply_develop(section: &mut Section, env: &HashMap<String, String>) -> Result<()> {
    for template in &section.dev_volumes {
        section
            .volumes
            .push(YamlValue::String(interpolate(template, env)?));
    }
    if let Some(dev_environment) = &section.dev_environment {
        section.environment.extend(dev_environment);
    }
    if let Some(dev_command) = &section.dev_command {
        section.command = Some(dev_command.clone());
    }
    Ok(())
}

/// `build: {context, dockerfile}` entry for a Dockerfile path.
fn build_entry(dockerfile: &std::path::Path) -> YamlValue {
    let context = dockerfile
        .parent()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| ".".to_string());
    let mut build = Mapping::new();
    build.insert(
        YamlValue::String("context".to_string()),
        YamlValue::String(context),
    );
    build.insert(
        YamlValue::String("dockerfile".to_string()),
        YamlValue::String(DOCKERFILE.to_string()),
    );
    YamlValue::Mapping(build)
}
