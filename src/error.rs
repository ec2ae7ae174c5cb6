//! # Error Handling
//!
//! This module defines the centralized error type for `bag8`. It uses the
//! `thiserror` library to build a single `Error` enum covering every failure
//! the manifest resolution engine can report, with enough context (project
//! names, paths, cycle paths) to act on the message without a debugger.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. The first five variants are the domain
//!   failures of project lookup and manifest merging; the rest wrap
//!   configuration, templating, subprocess and library errors.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Domain errors are fatal by default. The merger downgrades
//! `ProjectNotFound` and `MalformedManifest` to warnings for dependencies
//! only when best-effort mode is requested.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for bag8 operations
#[derive(Error, Debug)]
pub enum Error {
    /// No search root contains a directory for the requested project.
    #[error("Project not found: {project}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ProjectNotFound {
        project: String,
        /// Optional hint, usually the list of searched roots
        hint: Option<String>,
    },

    /// The project directory exists but has no Dockerfile to build from.
    #[error("Missing Dockerfile for {project} in {}", dir.display())]
    NoDockerfile { project: String, dir: PathBuf },

    /// The link graph of a project loops back onto itself.
    #[error("Dependency cycle detected: {cycle}")]
    DependencyCycle { cycle: String },

    /// A manifest could not be parsed or lacks a required section.
    #[error("Malformed manifest for {project}: {message}")]
    MalformedManifest { project: String, message: String },

    /// Two differently spelled projects sanitize to the same service key.
    #[error("Projects '{first}' and '{second}' both resolve to service '{simple_name}'")]
    DuplicateSimpleName {
        simple_name: String,
        first: String,
        second: String,
    },

    /// The user configuration file is unreadable or invalid.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A `dev_volumes` template could not be interpolated.
    #[error("Template processing error: {message}{}", variable.as_ref().map(|v| format!(" (variable: {})", v)).unwrap_or_default())]
    Template {
        message: String,
        /// The template variable that caused the error, if applicable
        variable: Option<String>,
    },

    /// The compose executor could not be spawned.
    #[error("Compose command failed: {command} - {message}")]
    Compose { command: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Whether best-effort merging may skip the dependency that raised this.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ProjectNotFound { .. } | Error::MalformedManifest { .. }
        )
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
