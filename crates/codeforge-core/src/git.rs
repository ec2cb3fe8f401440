//! Repository initialization

use crate::error::{Error, Result};
use crate::host::CommandRunner;
use camino::Utf8Path;
use tracing::{debug, info};

/// Run `git init` in `project_dir` as a foreground process
///
/// The caller decides whether a failure matters; the scaffolding workflow
/// only logs it.
pub async fn init_repository(runner: &dyn CommandRunner, project_dir: &Utf8Path) -> Result<()> {
    info!("Initializing git repository at: {}", project_dir);

    if project_dir.join(".git").exists() {
        debug!("Git repository already exists at: {}", project_dir);
        return Ok(());
    }

    let status = runner
        .run("git", &["init"], project_dir)
        .await
        .map_err(|e| Error::git_init(e.to_string()))?;

    if !status.success() {
        return Err(Error::git_init(format!("git init exited with {}", status)));
    }

    info!("Repository initialized successfully");
    Ok(())
}
