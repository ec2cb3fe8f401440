//! Hierarchical configuration loader
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Built-in defaults
//! 2. Config file (`--config <path>`, or `<config dir>/codeforge/config.yaml`)
//! 3. Environment variables (`CODEFORGE_*` prefix)
//! 4. CLI flags (handled by caller via [`ScaffoldConfig::with_overrides`])

use crate::error::{Error, Result};
use crate::types::{ManifestPolicy, SelectionPolicy, TEMPLATE_BRANCHES};
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::Deserialize;
use std::env;
use tracing::debug;

/// Environment override for [`ScaffoldConfig::selection`]
pub const ENV_SELECTION: &str = "CODEFORGE_SELECTION";
/// Environment override for [`ScaffoldConfig::manifest_policy`]
pub const ENV_MANIFEST_POLICY: &str = "CODEFORGE_MANIFEST_POLICY";
/// Environment override for [`ScaffoldConfig::default_branch`]
pub const ENV_DEFAULT_BRANCH: &str = "CODEFORGE_DEFAULT_BRANCH";

/// Resolved scaffolding configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldConfig {
    /// How to pick among several installed package managers
    pub selection: SelectionPolicy,
    /// What to do with `packageManager` in the manifest
    pub manifest_policy: ManifestPolicy,
    /// Branch preselected in the branch prompt
    pub default_branch: String,
    /// Name preselected in the project name prompt
    pub default_project_name: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            selection: SelectionPolicy::default(),
            manifest_policy: ManifestPolicy::default(),
            default_branch: "main".to_string(),
            default_project_name: "my-app".to_string(),
        }
    }
}

impl ScaffoldConfig {
    /// Apply CLI flag overrides
    pub fn with_overrides(
        mut self,
        selection: Option<SelectionPolicy>,
        manifest_policy: Option<ManifestPolicy>,
    ) -> Self {
        if let Some(selection) = selection {
            self.selection = selection;
        }
        if let Some(manifest_policy) = manifest_policy {
            self.manifest_policy = manifest_policy;
        }
        self
    }

    /// Index of the default branch among [`TEMPLATE_BRANCHES`]
    pub fn default_branch_index(&self) -> usize {
        TEMPLATE_BRANCHES
            .iter()
            .position(|b| *b == self.default_branch)
            .unwrap_or(0)
    }

    fn validate(&self) -> Result<()> {
        if !TEMPLATE_BRANCHES.contains(&self.default_branch.as_str()) {
            return Err(Error::invalid_config(format!(
                "default_branch must be one of {}, got \"{}\"",
                TEMPLATE_BRANCHES.join(", "),
                self.default_branch
            )));
        }
        if self.default_project_name.trim().is_empty() {
            return Err(Error::invalid_config("default_project_name must not be empty"));
        }
        Ok(())
    }
}

/// Config file layer; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    selection: Option<SelectionPolicy>,
    manifest_policy: Option<ManifestPolicy>,
    default_branch: Option<String>,
    default_project_name: Option<String>,
}

/// Configuration hierarchy loader
pub struct ConfigLoader {
    /// Config file to read
    path: Option<Utf8PathBuf>,
    /// Whether a missing file is an error
    required: bool,
}

impl ConfigLoader {
    /// Loader reading the user's config file if it exists
    pub fn new() -> Self {
        Self {
            path: Self::default_config_path(),
            required: false,
        }
    }

    /// Loader reading an explicitly named config file, which must exist
    pub fn with_file(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            required: true,
        }
    }

    /// `<config dir>/codeforge/config.yaml`
    pub fn default_config_path() -> Option<Utf8PathBuf> {
        let dirs = ProjectDirs::from("", "", "codeforge")?;
        Utf8PathBuf::from_path_buf(dirs.config_dir().join("config.yaml")).ok()
    }

    /// Load configuration with hierarchical precedence
    pub fn load(&self) -> Result<ScaffoldConfig> {
        let mut config = ScaffoldConfig::default();

        if let Some(path) = &self.path {
            if path.exists() {
                let file = Self::load_yaml_file(path)?;
                config = Self::merge_file(config, file);
            } else if self.required {
                return Err(Error::invalid_config(format!("config file not found: {}", path)));
            } else {
                debug!("No config file at {}", path);
            }
        }

        config = Self::apply_env_overrides(config)?;
        config.validate()?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    fn load_yaml_file(path: &Utf8Path) -> Result<ConfigFile> {
        debug!("Loading config file: {}", path);
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("{}: {}", path, e)))
    }

    fn merge_file(mut config: ScaffoldConfig, file: ConfigFile) -> ScaffoldConfig {
        if let Some(selection) = file.selection {
            config.selection = selection;
        }
        if let Some(manifest_policy) = file.manifest_policy {
            config.manifest_policy = manifest_policy;
        }
        if let Some(branch) = file.default_branch {
            config.default_branch = branch;
        }
        if let Some(name) = file.default_project_name {
            config.default_project_name = name;
        }
        config
    }

    fn apply_env_overrides(mut config: ScaffoldConfig) -> Result<ScaffoldConfig> {
        if let Some(value) = Self::env_value(ENV_SELECTION) {
            config.selection = value
                .parse()
                .map_err(|e: String| Error::invalid_config(format!("{}: {}", ENV_SELECTION, e)))?;
        }
        if let Some(value) = Self::env_value(ENV_MANIFEST_POLICY) {
            config.manifest_policy = value.parse().map_err(|e: String| {
                Error::invalid_config(format!("{}: {}", ENV_MANIFEST_POLICY, e))
            })?;
        }
        if let Some(value) = Self::env_value(ENV_DEFAULT_BRANCH) {
            config.default_branch = value;
        }
        Ok(config)
    }

    fn env_value(key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
