//! # bag8
//!
//! This library resolves a tree of linked docker projects into a single
//! compose manifest. It is used by the `bag8` command-line tool, which then
//! hands the manifest to an external compose executor.
//!
//! ## Quick Example
//!
//! ```
//! use bag8::manifest::Manifest;
//! use bag8::name::simplify;
//!
//! let manifest = Manifest::parse(
//!     "busybox",
//!     "app:\n  image: bag8/busybox\n  links: ['link.2:link']\n",
//! )
//! .unwrap();
//!
//! assert_eq!(manifest.external_links(), vec!["link.2"]);
//! assert_eq!(simplify("link.2"), "link2");
//! ```
//!
//! ## Core Concepts
//!
//! - **Projects (`project`, `locator`)**: a project is a directory holding a
//!   `fig.yml` manifest and optionally a `Dockerfile`, found under an ordered
//!   list of search roots.
//! - **Manifests (`manifest`)**: compose-like service sections with a few
//!   extensions (`dev_environment`, `dev_volumes`, `dev_command`,
//!   `domainname`).
//! - **Names (`name`)**: project names are sanitized into service keys and DNS
//!   labels.
//! - **Dependencies (`deps`)**: `app` links to other projects form a graph,
//!   resolved depth-first with cycle detection.
//! - **Merging (`merge`)**: every dependency is folded into one manifest, with
//!   service-discovery variables and develop-mode overrides applied.
//! - **Output (`writer`, `compose`)**: the merged manifest is written to a
//!   per-project path and run through the compose executor.
//!
//! ## Execution Flow
//!
//! 1.  **Configuration**: load `Config` once from the user file.
//! 2.  **Location**: find the requested project under the search roots.
//! 3.  **Resolution**: walk its links into a deepest-first dependency list.
//! 4.  **Merge**: fold the dependencies, then the project itself.
//! 5.  **Write**: persist the manifest to `{tmpfolder}/{prefix}_{project}.yml`.
//! 6.  **Dispatch**: run `<compose> -f <file> -p <prefix> <action>`.

pub mod compose;
pub mod config;
pub mod defaults;
pub mod deps;
pub mod error;
pub mod locator;
pub mod manifest;
pub mod merge;
pub mod name;
pub mod output;
pub mod project;
pub mod template;
pub mod writer;

#[cfg(test)]
mod name_proptest;
