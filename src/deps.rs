//! # Dependency Resolution
//!
//! A project depends on every project named by a link of its `app` section,
//! except links to sibling sections of its own manifest (those are internal
//! services started from the same file). Dependencies are resolved
//! recursively and depth-first, so the resulting list puts the deepest
//! projects first: folding manifests in list order never lets a dependency
//! override a project that depends on it.
//!
//! ## Cycle Detection
//!
//! The resolver tracks the chain of projects currently being resolved. A
//! link back onto that chain (`a -> b -> a`) aborts with
//! `Error::DependencyCycle`. The same project reached through two different
//! branches is not a cycle; it is simply listed once.

use log::warn;

use crate::error::{Error, Result};
use crate::locator::ProjectDirectoryResolver;
use crate::manifest::{self, Manifest};

/// Walks project links through a resolver.
pub struct DependencyResolver<'a, R: ProjectDirectoryResolver + ?Sized> {
    resolver: &'a R,
    best_effort: bool,
}

/// One project and the projects it links to, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub name: String,
    pub children: Vec<DependencyNode>,
    /// Set when the project could not be loaded in best-effort mode.
    pub missing: bool,
}

impl<'a, R: ProjectDirectoryResolver + ?Sized> DependencyResolver<'a, R> {
    pub fn new(resolver: &'a R) -> Self {
        Self {
            resolver,
            best_effort: false,
        }
    }

    /// Skip dependencies whose manifest is missing or unreadable instead of
    /// failing.
    pub fn best_effort(mut self, best_effort: bool) -> Self {
        self.best_effort = best_effort;
        self
    }

    /// Distinct external dependencies of `project`, deepest first.
    pub fn resolve_deps(&self, project: &str) -> Result<Vec<String>> {
        let manifest = manifest::load(self.resolver, project)?;
        let mut chain = vec![project.to_string()];
        let mut resolved = Vec::new();
        self.visit(&manifest, &mut chain, &mut resolved)?;
        Ok(resolved)
    }

    fn visit(
        &self,
        manifest: &Manifest,
        chain: &mut Vec<String>,
        resolved: &mut Vec<String>,
    ) -> Result<()> {
        for dep in manifest.external_links() {
            check_cycle(chain, dep)?;
            if resolved.iter().any(|r| r == dep) {
                continue;
            }

            if let Some(dep_manifest) = self.load_dependency(dep)? {
                chain.push(dep.to_string());
                self.visit(&dep_manifest, chain, resolved)?;
                chain.pop();
            }
            resolved.push(dep.to_string());
        }
        Ok(())
    }

    /// Dependency tree rooted at `project`. Shared dependencies appear under
    /// every project that links to them.
    pub fn dependency_tree(&self, project: &str) -> Result<DependencyNode> {
        let manifest = manifest::load(self.resolver, project)?;
        let mut chain = vec![project.to_string()];
        self.build_node(project, Some(&manifest), &mut chain)
    }

    fn build_node(
        &self,
        name: &str,
        manifest: Option<&Manifest>,
        chain: &mut Vec<String>,
    ) -> Result<DependencyNode> {
        let Some(manifest) = manifest else {
            return Ok(DependencyNode {
                name: name.to_string(),
                children: Vec::new(),
                missing: true,
            });
        };

        let mut children = Vec::new();
        for dep in manifest.external_links() {
            check_cycle(chain, dep)?;
            let dep_manifest = self.load_dependency(dep)?;
            chain.push(dep.to_string());
            children.push(self.build_node(dep, dep_manifest.as_ref(), chain)?);
            chain.pop();
        }

        Ok(DependencyNode {
            name: name.to_string(),
            children,
            missing: false,
        })
    }

    /// Loads a dependency's manifest; `None` when best-effort mode skips it.
    fn load_dependency(&self, name: &str) -> Result<Option<Manifest>> {
        match manifest::load(self.resolver, name) {
            Ok(manifest) => Ok(Some(manifest)),
            Err(e) if self.best_effort && e.is_recoverable() => {
                warn!("Skipping dependencies of {}: {}", name, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn check_cycle(chain: &[String], dep: &str) -> Result<()> {
    if chain.iter().any(|c| c == dep) {
        let mut cycle: Vec<&str> = chain.iter().map(String::as_str).collect();
        cycle.push(dep);
        return Err(Error::DependencyCycle {
            cycle: cycle.join(" -> "),
        });
    }
    Ok(())
}
