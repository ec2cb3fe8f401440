//! # codeforge-core
//!
//! Core library for `create-codeforge` providing:
//! - Package manager detection (invocation hint and search path probe)
//! - Package manager resolution with explicit selection policies
//! - Template adaptation (pnpm artifact cleanup, `package.json` editing)
//! - Template download, git init, and dependency install
//! - Hierarchical configuration loading
//!
//! # Examples
//!
//! ## Resolve a package manager
//!
//! ```
//! use codeforge_core::resolver::{resolve, Resolution};
//! use codeforge_core::types::{AvailableManagers, PackageManager, SelectionPolicy};
//!
//! let available = AvailableManagers::new([PackageManager::Npm]);
//! let resolution = resolve(None, &available, SelectionPolicy::Prompt).unwrap();
//! assert!(matches!(
//!     resolution,
//!     Resolution::Selected { manager: PackageManager::Npm, .. }
//! ));
//! ```
//!
//! ## Adapt a downloaded template for yarn
//!
//! ```no_run
//! use codeforge_core::{cleanup, manifest};
//! use codeforge_core::types::{ManifestPolicy, PackageManager};
//! use camino::Utf8Path;
//!
//! let project = Utf8Path::new("my-app");
//! let report = cleanup::cleanup(PackageManager::Yarn, project);
//! assert!(report.is_clean());
//! manifest::update_manifest(PackageManager::Yarn, project, ManifestPolicy::Declare, None).unwrap();
//! ```

pub mod cleanup;
pub mod config;
pub mod error;
pub mod git;
pub mod host;
pub mod install;
pub mod manifest;
pub mod probe;
pub mod resolver;
pub mod template;
pub mod types;

pub use config::{ConfigLoader, ScaffoldConfig};
pub use error::{Error, Result};
pub use types::{AvailableManagers, ManifestPolicy, PackageManager, SelectionPolicy};
