//! Removal of pnpm-specific template artifacts
//!
//! The template ships configured for pnpm. When another manager is chosen,
//! pnpm's lockfile, workspace file, `.npmrc`, and store directory are removed
//! so they do not confuse the chosen manager.

use crate::error::Error;
use crate::types::PackageManager;
use camino::{Utf8Path, Utf8PathBuf};
use std::io::ErrorKind;
use tracing::{debug, warn};

/// A pnpm-specific path inside the project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    File(&'static str),
    Dir(&'static str),
}

impl Artifact {
    pub fn name(&self) -> &'static str {
        match self {
            Self::File(name) | Self::Dir(name) => name,
        }
    }
}

/// Artifacts removed when the chosen manager is not pnpm
pub const PNPM_ARTIFACTS: &[Artifact] = &[
    Artifact::File("pnpm-lock.yaml"),
    Artifact::File("pnpm-workspace.yaml"),
    Artifact::File(".npmrc"),
    Artifact::Dir(".pnpm"),
];

/// Outcome of a cleanup pass
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Paths that existed and were removed
    pub removed: Vec<Utf8PathBuf>,
    /// Paths that could not be removed
    pub failed: Vec<Error>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Remove pnpm artifacts from `project_dir` unless `chosen` is pnpm
///
/// Absent paths are skipped. A failure on one artifact is recorded and the
/// remaining artifacts are still attempted.
pub fn cleanup(chosen: PackageManager, project_dir: &Utf8Path) -> CleanupReport {
    let mut report = CleanupReport::default();

    if chosen.is_template_native() {
        debug!("{} is the template's native manager, skipping cleanup", chosen);
        return report;
    }

    for artifact in PNPM_ARTIFACTS {
        let path = project_dir.join(artifact.name());
        let result = match artifact {
            Artifact::File(_) => std::fs::remove_file(&path),
            Artifact::Dir(_) => std::fs::remove_dir_all(&path),
        };

        match result {
            Ok(()) => {
                debug!("Removed {}", path);
                report.removed.push(path);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                warn!("Failed to remove {}: {}", path, e);
                report.failed.push(Error::cleanup(path.as_str(), e.to_string()));
            }
        }
    }

    report
}
