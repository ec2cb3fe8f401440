//! Template download
//!
//! The template is fetched as a GitHub tarball of the requested branch and
//! unpacked into the project directory with the archive's top-level
//! directory (`<repo>-<branch>/`) stripped, leaving no git history behind.

use crate::error::{Error, Result};
use crate::host::TemplateFetcher;
use crate::types::TEMPLATE_REPOSITORY;
use async_trait::async_trait;
use camino::Utf8Path;
use flate2::read::GzDecoder;
use std::io;
use std::path::{Component, Path, PathBuf};
use tar::Archive;
use tracing::{debug, info};

/// GitHub tarball host
pub const CODELOAD_BASE_URL: &str = "https://codeload.github.com";

/// Reject branch names git would not accept as a ref
pub fn validate_branch(branch: &str) -> Result<()> {
    if branch.is_empty()
        || branch.contains("..")
        || branch.starts_with('-')
        || branch.starts_with('/')
        || branch.chars().any(|c| c.is_whitespace() || c == '#' || c == '?')
    {
        return Err(Error::invalid_branch(branch));
    }
    Ok(())
}

/// Downloads the template tarball over HTTPS
#[derive(Debug, Clone)]
pub struct TarballFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl TarballFetcher {
    /// Fetcher for the public GitHub tarball host
    pub fn new() -> Result<Self> {
        Self::with_base_url(CODELOAD_BASE_URL)
    }

    /// Fetcher against another host serving the same URL layout
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("create-codeforge/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Tarball URL for `branch`
    pub fn archive_url(&self, branch: &str) -> String {
        format!("{}/{}/tar.gz/{}", self.base_url, TEMPLATE_REPOSITORY, branch)
    }
}

#[async_trait]
impl TemplateFetcher for TarballFetcher {
    async fn fetch(&self, branch: &str, destination: &Utf8Path) -> Result<()> {
        validate_branch(branch)?;

        let url = self.archive_url(branch);
        info!("Downloading template from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::template_fetch(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::branch_not_found(TEMPLATE_REPOSITORY, branch));
        }
        if !status.is_success() {
            return Err(Error::template_fetch(format!("{} returned {}", url, status)));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| Error::template_fetch(format!("download interrupted: {}", e)))?;
        debug!("Downloaded {} bytes", data.len());

        let destination = destination.to_owned();
        let written = tokio::task::spawn_blocking(move || extract_tarball(&data, &destination))
            .await
            .map_err(|e| Error::template_fetch(format!("extraction task failed: {}", e)))??;

        info!("Unpacked {} template entries", written);
        Ok(())
    }
}

/// Unpack a gzipped tarball into `destination`, stripping the top-level
/// directory; returns the number of entries written
pub fn extract_tarball(data: &[u8], destination: &Utf8Path) -> Result<usize> {
    unpack_stripped(data, destination.as_std_path())
        .map_err(|e| Error::template_fetch(format!("failed to unpack archive: {}", e)))
        .and_then(|written| {
            if written == 0 {
                Err(Error::template_fetch("archive contained no files"))
            } else {
                Ok(written)
            }
        })
}

fn unpack_stripped(data: &[u8], destination: &Path) -> io::Result<usize> {
    let mut archive = Archive::new(GzDecoder::new(data));
    std::fs::create_dir_all(destination)?;
    let root = destination.canonicalize()?;

    let mut written = 0;
    for entry in archive.entries()? {
        let mut entry = entry?;
        let entry_type = entry.header().entry_type();
        if entry_type.is_pax_global_extensions() {
            continue;
        }

        let path = entry.path()?.into_owned();
        let Some(relative) = strip_top_level(&path)? else {
            continue;
        };
        ensure_inside(&root, &relative)?;
        let target = root.join(&relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if entry_type.is_hard_link() {
            let link = entry.link_name()?.ok_or_else(|| unsafe_path(&path))?;
            let source = strip_top_level(&link)?.ok_or_else(|| unsafe_path(&link))?;
            ensure_inside(&root, &source)?;
            std::fs::hard_link(root.join(source), &target)?;
            written += 1;
            continue;
        }
        if entry_type.is_symlink() {
            let link = entry.link_name()?.ok_or_else(|| unsafe_path(&path))?;
            check_symlink_target(&relative, &link)?;
        }

        entry.unpack(&target)?;
        written += 1;
    }

    Ok(written)
}

/// Drop the first path component; `None` for the top-level directory itself
fn strip_top_level(path: &Path) -> io::Result<Option<PathBuf>> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(_)) => {}
        _ => return Err(unsafe_path(path)),
    }

    let mut relative = PathBuf::new();
    for component in components {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => return Err(unsafe_path(path)),
        }
    }

    Ok((!relative.as_os_str().is_empty()).then_some(relative))
}

/// The nearest existing ancestor of `root/relative` must resolve under `root`
///
/// Catches directories replaced by symlinks earlier in the same archive.
fn ensure_inside(root: &Path, relative: &Path) -> io::Result<()> {
    let target = root.join(relative);
    let mut ancestor = target.parent();

    while let Some(dir) = ancestor {
        match dir.symlink_metadata() {
            Ok(_) => {
                if dir.canonicalize()?.starts_with(root) {
                    return Ok(());
                }
                return Err(unsafe_path(relative));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => ancestor = dir.parent(),
            Err(e) => return Err(e),
        }
    }

    Err(unsafe_path(relative))
}

/// Symlink targets must be relative and resolve inside the tree
fn check_symlink_target(relative: &Path, link: &Path) -> io::Result<()> {
    let mut depth = relative
        .parent()
        .map(|p| p.components().count())
        .unwrap_or(0);

    for component in link.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir if depth > 0 => depth -= 1,
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "symlink {} points outside the project: {}",
                        relative.display(),
                        link.display()
                    ),
                ))
            }
        }
    }

    Ok(())
}

fn unsafe_path(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("unsafe path in archive: {}", path.display()),
    )
}
