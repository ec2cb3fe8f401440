//! Shared test helpers for codeforge-core integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use codeforge_core::host::{CommandRunner, RunStatus};
use codeforge_core::{Error, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::TempDir;

/// The template's `package.json` as shipped for pnpm
pub const TEMPLATE_MANIFEST: &str = r#"{
  "name": "codeforge",
  "private": true,
  "scripts": {
    "build": "turbo run build",
    "dev": "turbo run dev",
    "lint": "turbo run lint"
  },
  "devDependencies": {
    "prettier": "^3.2.5",
    "turbo": "^2.0.4"
  },
  "packageManager": "pnpm@9.1.0",
  "engines": {
    "node": ">=18"
  }
}"#;

/// A subprocess invocation seen by [`FakeRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Utf8PathBuf,
}

/// Runner returning scripted results and recording every call
#[derive(Default)]
pub struct FakeRunner {
    exit_codes: HashMap<String, i32>,
    outputs: HashMap<String, String>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit code for `<program> <args...>`; unscripted commands exit 0
    pub fn exit_code(mut self, command: &str, code: i32) -> Self {
        self.exit_codes.insert(command.to_string(), code);
        self
    }

    /// Captured stdout for `<program> <args...>`
    pub fn output(mut self, command: &str, stdout: &str) -> Self {
        self.outputs.insert(command.to_string(), stdout.to_string());
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| format!("{} {}", c.program, c.args.join(" ")).trim().to_string())
            .collect()
    }

    fn record(&self, program: &str, args: &[&str], cwd: &Utf8Path) -> String {
        self.calls.lock().unwrap().push(Call {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.to_owned(),
        });
        format!("{} {}", program, args.join(" ")).trim().to_string()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Utf8Path) -> Result<RunStatus> {
        let command = self.record(program, args, cwd);
        Ok(RunStatus {
            code: Some(self.exit_codes.get(&command).copied().unwrap_or(0)),
        })
    }

    async fn capture(&self, program: &str, args: &[&str], cwd: &Utf8Path) -> Result<String> {
        let command = self.record(program, args, cwd);
        self.outputs
            .get(&command)
            .cloned()
            .ok_or_else(|| Error::process_execution(format!("{}: not found", program)))
    }
}

/// Temp directory with a UTF-8 path
pub fn temp_dir() -> (TempDir, Utf8PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
    (temp, path)
}

/// A project directory laid out like a freshly downloaded template
pub fn downloaded_template() -> (TempDir, Utf8PathBuf) {
    let (temp, dir) = temp_dir();
    std::fs::write(dir.join("package.json"), TEMPLATE_MANIFEST).unwrap();
    std::fs::write(dir.join("pnpm-lock.yaml"), "lockfileVersion: '9.0'\n").unwrap();
    std::fs::write(
        dir.join("pnpm-workspace.yaml"),
        "packages:\n  - \"apps/*\"\n  - \"packages/*\"\n",
    )
    .unwrap();
    std::fs::write(dir.join(".npmrc"), "auto-install-peers=true\n").unwrap();
    std::fs::create_dir_all(dir.join(".pnpm")).unwrap();
    std::fs::create_dir_all(dir.join("apps/web")).unwrap();
    std::fs::write(dir.join("apps/web/package.json"), r#"{"name": "web"}"#).unwrap();
    (temp, dir)
}

/// Gzipped tarball shaped like a GitHub branch archive
pub fn github_tarball(top_level: &str, files: &[(&str, &str)]) -> Vec<u8> {
    github_tarball_with_symlinks(top_level, &[], files)
}

/// Like [`github_tarball`], with `(path, target)` symlinks written before
/// the files
pub fn github_tarball_with_symlinks(
    top_level: &str,
    symlinks: &[(&str, &str)],
    files: &[(&str, &str)],
) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let mut dir_header = tar::Header::new_gnu();
    dir_header.set_entry_type(tar::EntryType::Directory);
    dir_header.set_mode(0o755);
    dir_header.set_size(0);
    builder
        .append_data(&mut dir_header, format!("{}/", top_level), std::io::empty())
        .unwrap();

    for (path, target) in symlinks {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Symlink);
        header.set_mode(0o777);
        header.set_size(0);
        builder
            .append_link(&mut header, format!("{}/{}", top_level, path), target)
            .unwrap();
    }

    for (path, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_mode(0o644);
        header.set_size(content.len() as u64);
        builder
            .append_data(
                &mut header,
                format!("{}/{}", top_level, path),
                content.as_bytes(),
            )
            .unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap()
}
