//! Package manager subprocesses: version lookup and dependency install

use crate::error::{Error, Result};
use crate::host::CommandRunner;
use crate::types::PackageManager;
use camino::Utf8Path;
use tracing::{debug, info};

/// Version reported by `<manager> -v`
pub async fn manager_version(
    runner: &dyn CommandRunner,
    manager: PackageManager,
    project_dir: &Utf8Path,
) -> Result<String> {
    let version = runner
        .capture(manager.as_str(), &["-v"], project_dir)
        .await
        .map_err(|e| Error::version_detection(manager.as_str(), e.to_string()))?
        .trim()
        .to_string();

    if version.is_empty() {
        return Err(Error::version_detection(manager.as_str(), "no version reported"));
    }

    debug!("{} version: {}", manager, version);
    Ok(version)
}

/// Run `<manager> install` in the foreground
pub async fn install_dependencies(
    runner: &dyn CommandRunner,
    manager: PackageManager,
    project_dir: &Utf8Path,
) -> Result<()> {
    info!("Installing dependencies with {} in {}", manager, project_dir);

    let status = runner
        .run(manager.as_str(), &["install"], project_dir)
        .await
        .map_err(|e| Error::install_failed(manager.as_str(), e.to_string()))?;

    if !status.success() {
        return Err(Error::install_failed(
            manager.as_str(),
            format!("{} install exited with {}", manager, status),
        ));
    }

    info!("Dependencies installed");
    Ok(())
}
