//! Collaborator traits for the scaffolding workflow
//!
//! Everything that touches the terminal, the network, the search path, or
//! spawns processes sits behind one of these traits so the workflow can be
//! driven by fakes in tests:
//! - [`Prompter`]: interactive questions
//! - [`TemplateFetcher`]: remote template download
//! - [`ExecutableResolver`]: search path lookup
//! - [`CommandRunner`]: foreground and captured subprocesses

use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::Utf8Path;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Interactive prompt provider
pub trait Prompter {
    /// Free-text question; `validate` returns an error message for rejected input
    fn input(
        &self,
        question: &str,
        default: &str,
        validate: &dyn Fn(&str) -> std::result::Result<(), String>,
    ) -> Result<String>;

    /// Single choice from a list, returning the selected index
    fn select(&self, question: &str, items: &[String], default: usize) -> Result<usize>;

    /// Yes/no confirmation
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;
}

/// Remote template fetcher
#[async_trait]
pub trait TemplateFetcher: Send + Sync {
    /// Download the template at `branch` into `destination`
    async fn fetch(&self, branch: &str, destination: &Utf8Path) -> Result<()>;
}

/// Executable lookup on the host search path
pub trait ExecutableResolver {
    fn which(&self, name: &str) -> Result<PathBuf>;
}

/// Exit status of a foreground subprocess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Subprocess runner
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run in the foreground, inheriting stdin/stdout/stderr
    async fn run(&self, program: &str, args: &[&str], cwd: &Utf8Path) -> Result<RunStatus>;

    /// Run and capture trimmed stdout; non-zero exit is an error
    async fn capture(&self, program: &str, args: &[&str], cwd: &Utf8Path) -> Result<String>;
}

/// Resolver backed by the `which` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl ExecutableResolver for SystemResolver {
    fn which(&self, name: &str) -> Result<PathBuf> {
        which::which(name).map_err(|e| Error::executable_not_found(name, e.to_string()))
    }
}

/// Runner backed by `tokio::process`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Utf8Path) -> Result<RunStatus> {
        debug!("Running: {} {} (in {})", program, args.join(" "), cwd);
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .await
            .map_err(|e| Error::process_execution(format!("{}: {}", program, e)))?;

        Ok(RunStatus {
            code: status.code(),
        })
    }

    async fn capture(&self, program: &str, args: &[&str], cwd: &Utf8Path) -> Result<String> {
        debug!("Capturing: {} {} (in {})", program, args.join(" "), cwd);
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .await
            .map_err(|e| Error::process_execution(format!("{}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::process_execution(format!(
                "{} {} failed: {}",
                program,
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
