//! # Compose Dispatch
//!
//! Container operations are delegated to an external compose executor
//! (`docker-compose` by default) run against a rendered manifest:
//!
//! ```text
//! <compose> -f <manifest> -p <prefix> <action> [args...]
//! ```
//!
//! The child inherits stdin, stdout and stderr and its exit code is handed
//! back to the caller.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::info;

use crate::error::{Error, Result};

/// Lifecycle operations forwarded to the compose executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeAction {
    Up,
    Run,
    Build,
    Start,
    Stop,
    Rm,
    Logs,
    Pull,
    Push,
    Exec,
}

impl ComposeAction {
    pub fn name(&self) -> &'static str {
        match self {
            ComposeAction::Up => "up",
            ComposeAction::Run => "run",
            ComposeAction::Build => "build",
            ComposeAction::Start => "start",
            ComposeAction::Stop => "stop",
            ComposeAction::Rm => "rm",
            ComposeAction::Logs => "logs",
            ComposeAction::Pull => "pull",
            ComposeAction::Push => "push",
            ComposeAction::Exec => "exec",
        }
    }

    /// Action arguments.
    ///
    /// `primary` is the project's own service. Actions on a single container
    /// (`run`, `build`, `push`, `logs`, `exec`) use `service` when given and
    /// `primary` otherwise; the others cover every service unless `service`
    /// narrows them.
    pub fn args(&self, primary: &str, service: Option<&str>, extra: &[String]) -> Vec<String> {
        let target = service.unwrap_or(primary);
        let mut args: Vec<String> = match self {
            ComposeAction::Up => vec!["up".into(), "-d".into()],
            ComposeAction::Run => vec!["run".into(), "--rm".into(), target.into()],
            ComposeAction::Build
            | ComposeAction::Push
            | ComposeAction::Logs
            | ComposeAction::Exec => vec![self.name().into(), target.into()],
            ComposeAction::Rm => vec!["rm".into(), "-s".into(), "-f".into()],
            ComposeAction::Start | ComposeAction::Stop | ComposeAction::Pull => {
                vec![self.name().into()]
            }
        };
        if self.covers_all_services() {
            args.extend(service.map(str::to_string));
        }
        if *self == ComposeAction::Exec && extra.is_empty() {
            args.push("bash".into());
        }
        args.extend(extra.iter().cloned());
        args
    }

    fn covers_all_services(&self) -> bool {
        matches!(
            self,
            ComposeAction::Up
                | ComposeAction::Rm
                | ComposeAction::Start
                | ComposeAction::Stop
                | ComposeAction::Pull
        )
    }
}

impl fmt::Display for ComposeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compose invocation against one rendered manifest.
#[derive(Debug, Clone)]
pub struct ComposeCommand {
    program: String,
    file: PathBuf,
    project_name: String,
}

impl ComposeCommand {
    pub fn new(program: impl Into<String>, file: impl Into<PathBuf>, project_name: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            file: file.into(),
            project_name: project_name.into(),
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Full argument list, program excluded.
    ///
    /// `program` may itself carry arguments (`docker compose`); they come
    /// first.
    pub fn args(
        &self,
        action: ComposeAction,
        primary: &str,
        service: Option<&str>,
        extra: &[String],
    ) -> Vec<String> {
        let mut args: Vec<String> = self
            .program
            .split_whitespace()
            .skip(1)
            .map(str::to_string)
            .collect();
        args.push("-f".to_string());
        args.push(self.file.display().to_string());
        args.push("-p".to_string());
        args.push(self.project_name.clone());
        args.extend(action.args(primary, service, extra));
        args
    }

    fn program_name(&self) -> &str {
        self.program.split_whitespace().next().unwrap_or_default()
    }

    /// Shell-like rendering of the invocation, for logs and dry runs.
    pub fn display(
        &self,
        action: ComposeAction,
        primary: &str,
        service: Option<&str>,
        extra: &[String],
    ) -> String {
        std::iter::once(self.program_name().to_string())
            .chain(self.args(action, primary, service, extra))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the executor to completion and returns its exit code.
    pub fn run(
        &self,
        action: ComposeAction,
        primary: &str,
        service: Option<&str>,
        extra: &[String],
    ) -> Result<i32> {
        let display = self.display(action, primary, service, extra);
        info!("{}", display);

        let status = Command::new(self.program_name())
            .args(self.args(action, primary, service, extra))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::Compose {
                command: display.clone(),
                message: e.to_string(),
            })?;

        // Killed by a signal: no code, report a generic failure.
        Ok(status.code().unwrap_or(1))
    }
}
