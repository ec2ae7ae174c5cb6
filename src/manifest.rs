//! # Project Manifests
//!
//! This module parses a project's `fig.yml` into typed service sections.
//!
//! ## Key Components
//!
//! - **`Environment`**: A key-unique mapping of environment variables. The
//!   compose format accepts both a list of `KEY=VALUE` strings and a mapping;
//!   both are normalized here, at the load boundary, so nothing downstream has
//!   to care which shape the author used.
//!
//! - **`Section`**: One service definition. Fields the merge engine reads or
//!   rewrites are typed; every other key is carried through untouched in
//!   `extra`.
//!
//! - **`Manifest`**: All sections of one project, keyed by section name. The
//!   `app` section is the project's primary container; any other section is a
//!   sibling (support) service such as a database.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::Value as YamlValue;

use crate::defaults::APP_SECTION;
use crate::error::{Error, Result};
use crate::locator::ProjectDirectoryResolver;
use crate::name::split_link;

/// Environment variables of a service, normalized to a mapping.
///
/// A value of `None` is a variable declared without a value, which compose
/// passes through from the host environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment(BTreeMap<String, Option<String>>);

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an environment from a raw YAML value (list, mapping or null).
    pub fn from_yaml(value: &YamlValue) -> std::result::Result<Self, String> {
        let mut env = Self::new();
        match value {
            YamlValue::Null => {}
            YamlValue::Sequence(items) => {
                for item in items {
                    let entry = item.as_str().ok_or_else(|| {
                        format!(
                            "environment list entries must be strings, found {}",
                            get_yaml_type_name(item)
                        )
                    })?;
                    match entry.split_once('=') {
                        Some((key, val)) => env.insert(key, val),
                        None => {
                            env.0.insert(entry.to_string(), None);
                        }
                    }
                }
            }
            YamlValue::Mapping(map) => {
                for (key, val) in map {
                    let key = scalar_to_string(key)?
                        .ok_or_else(|| "environment keys must not be null".to_string())?;
                    env.0.insert(key, scalar_to_string(val)?);
                }
            }
            other => {
                return Err(format!(
                    "environment must be a list or a mapping, found {}",
                    get_yaml_type_name(other)
                ))
            }
        }
        Ok(env)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Some(value.into()));
    }

    /// Copies every entry of `other` into `self`, overriding on collision.
    pub fn extend(&mut self, other: &Environment) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        for (key, value) in iter {
            env.insert(key, value);
        }
        env
    }
}

impl Serialize for Environment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Environment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = YamlValue::deserialize(deserializer)?;
        Environment::from_yaml(&value).map_err(serde::de::Error::custom)
    }
}

/// One service definition of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<YamlValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<YamlValue>,

    /// Overrides the generated DNS alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domainname: Option<String>,

    #[serde(default)]
    pub environment: Environment,

    /// `target` or `target:alias` entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<YamlValue>,

    /// Environment applied on top of `environment` in develop mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_environment: Option<Environment>,

    /// `%(VAR)s` templates appended to `volumes` in develop mode.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dev_volumes: Vec<String>,

    /// Replaces `command` in develop mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_command: Option<YamlValue>,

    /// Every other compose key (ports, expose, user, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, YamlValue>,
}

impl Section {
    /// Link targets, without aliases.
    pub fn link_targets(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|link| split_link(link).0)
    }

    /// The name each link is reachable under inside the container: the alias
    /// when one is given, the target otherwise.
    pub fn link_names(&self) -> Vec<&str> {
        self.links
            .iter()
            .map(|link| match split_link(link) {
                (_, Some(alias)) => alias,
                (target, None) => target,
            })
            .collect()
    }

    pub fn has_dev_directives(&self) -> bool {
        self.dev_environment.is_some() || !self.dev_volumes.is_empty() || self.dev_command.is_some()
    }

    /// Drops the develop-only directives.
    pub fn strip_dev_directives(&mut self) {
        self.dev_environment = None;
        self.dev_volumes.clear();
        self.dev_command = None;
    }
}

/// All sections of one project manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    sections: BTreeMap<String, Section>,
}

impl Manifest {
    /// Parses manifest text. `project` only labels errors.
    pub fn parse(project: &str, content: &str) -> Result<Self> {
        let malformed = |message: String| Error::MalformedManifest {
            project: project.to_string(),
            message,
        };

        let mut root: YamlValue =
            serde_yaml::from_str(content).map_err(|e| malformed(e.to_string()))?;
        // `<<: *anchor` keys are folded into their mapping before typing.
        root.apply_merge().map_err(|e| malformed(e.to_string()))?;
        let mapping = match root {
            YamlValue::Mapping(mapping) => mapping,
            YamlValue::Null => return Err(malformed("manifest is empty".to_string())),
            other => {
                return Err(malformed(format!(
                    "expected a mapping of sections, found {}",
                    get_yaml_type_name(&other)
                )))
            }
        };

        let mut sections = BTreeMap::new();
        for (key, value) in mapping {
            let name = match key {
                YamlValue::String(name) => name,
                other => {
                    return Err(malformed(format!(
                        "section names must be strings, found {}",
                        get_yaml_type_name(&other)
                    )))
                }
            };
            let section = match value {
                YamlValue::Null => Section::default(),
                value => serde_yaml::from_value::<Section>(value)
                    .map_err(|e| malformed(format!("section '{}': {}", name, e)))?,
            };
            sections.insert(name, section);
        }

        Ok(Self { sections })
    }

    /// Reads and parses the manifest file at `path`.
    pub fn from_file<P: AsRef<Path>>(project: &str, path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        Self::parse(project, &content)
    }

    pub fn app(&self) -> Option<&Section> {
        self.sections.get(APP_SECTION)
    }

    /// The `app` section, or a `MalformedManifest` error naming `project`.
    pub fn require_app(&self, project: &str) -> Result<&Section> {
        self.app().ok_or_else(|| Error::MalformedManifest {
            project: project.to_string(),
            message: format!("missing '{}' section", APP_SECTION),
        })
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_sections(self) -> impl Iterator<Item = (String, Section)> {
        self.sections.into_iter()
    }

    /// Sibling section names, i.e. every section except `app`.
    pub fn internal_sections(&self) -> impl Iterator<Item = &str> {
        self.sections
            .keys()
            .map(String::as_str)
            .filter(|name| *name != APP_SECTION)
    }

    pub fn is_internal(&self, target: &str) -> bool {
        target != APP_SECTION && self.sections.contains_key(target)
    }

    /// Targets of the `app` links, without aliases.
    pub fn links(&self) -> Vec<&str> {
        self.app()
            .map(|app| app.link_targets().collect())
            .unwrap_or_default()
    }

    /// `app` link targets naming other projects, in declaration order.
    pub fn external_links(&self) -> Vec<&str> {
        let mut external: Vec<&str> = Vec::new();
        for target in self.links() {
            if !self.is_internal(target) && !external.contains(&target) {
                external.push(target);
            }
        }
        external
    }

    pub fn image(&self) -> Option<&str> {
        self.app().and_then(|app| app.image.as_deref())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Locates and parses the manifest of the project called `name`.
pub fn load<R: ProjectDirectoryResolver + ?Sized>(resolver: &R, name: &str) -> Result<Manifest> {
    let path = resolver.locate(name)?;
    Manifest::from_file(name, path)
}

/// Human-readable type name of a YAML value, for error messages.
pub fn get_yaml_type_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "Null",
        YamlValue::Bool(_) => "Bool",
        YamlValue::Number(_) => "Number",
        YamlValue::String(_) => "String",
        YamlValue::Sequence(_) => "Sequence",
        YamlValue::Mapping(_) => "Mapping",
        YamlValue::Tagged(_) => "Tagged",
    }
}

fn scalar_to_string(value: &YamlValue) -> std::result::Result<Option<String>, String> {
    match value {
        YamlValue::Null => Ok(None),
        YamlValue::String(s) => Ok(Some(s.clone())),
        YamlValue::Number(n) => Ok(Some(n.to_string())),
        YamlValue::Bool(b) => Ok(Some(b.to_string())),
        other => Err(format!(
            "environment values must be scalars, found {}",
            get_yaml_type_name(other)
        )),
    }
}
