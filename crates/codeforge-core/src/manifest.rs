//! `package.json` editing
//!
//! Only two fields are understood: `packageManager` and `workspaces`. Every
//! other field is kept verbatim, and the document keeps its key order when
//! written back. Keys that did not exist before are appended.

use crate::error::{Error, Result};
use crate::types::{ManifestPolicy, PackageManager, WORKSPACE_GLOBS, YARN_VERSION};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Manifest file name inside the project directory
pub const MANIFEST_FILE: &str = "package.json";

const PACKAGE_MANAGER_KEY: &str = "packageManager";
const WORKSPACES_KEY: &str = "workspaces";

/// `packageManager` field: a `<name>@<version>` string, or any other value
/// kept as-is until a policy overwrites or removes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackageManagerField {
    Declared(String),
    Other(Value),
}

impl PackageManagerField {
    pub fn declared(&self) -> Option<&str> {
        match self {
            Self::Declared(spec) => Some(spec),
            Self::Other(_) => None,
        }
    }
}

/// `workspaces` field: a glob list, or any other shape kept as-is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Workspaces {
    Globs(Vec<String>),
    Other(Value),
}

/// Typed view of `package.json`
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// `packageManager`, e.g. `pnpm@9.1.0`
    pub package_manager: Option<PackageManagerField>,
    /// `workspaces`
    pub workspaces: Option<Workspaces>,
    rest: Map<String, Value>,
    key_order: Vec<String>,
}

impl Manifest {
    /// Parse a manifest document; the top level must be an object
    pub fn parse(content: &str) -> Result<Self> {
        let mut rest: Map<String, Value> = serde_json::from_str(content)?;
        let key_order = rest.keys().cloned().collect();

        let package_manager = rest
            .shift_remove(PACKAGE_MANAGER_KEY)
            .map(serde_json::from_value::<PackageManagerField>)
            .transpose()?;
        let workspaces = rest
            .shift_remove(WORKSPACES_KEY)
            .map(serde_json::from_value::<Workspaces>)
            .transpose()?;

        Ok(Self {
            package_manager,
            workspaces,
            rest,
            key_order,
        })
    }

    /// Load from `path`
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::manifest_unreadable(path.as_str(), e.to_string()))?;
        Self::parse(&content).map_err(|e| Error::manifest_unreadable(path.as_str(), e.to_string()))
    }

    /// `packageManager` when it is a string
    pub fn declared_package_manager(&self) -> Option<&str> {
        self.package_manager.as_ref().and_then(PackageManagerField::declared)
    }

    /// Field outside the two typed ones
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.rest.get(key)
    }

    /// Rebuild the JSON object in original key order
    pub fn to_value(&self) -> Result<Value> {
        let package_manager = self
            .package_manager
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;
        let workspaces = self
            .workspaces
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        let mut out = Map::new();
        for key in &self.key_order {
            let value = match key.as_str() {
                PACKAGE_MANAGER_KEY => package_manager.clone(),
                WORKSPACES_KEY => workspaces.clone(),
                other => self.rest.get(other).cloned(),
            };
            if let Some(value) = value {
                out.insert(key.clone(), value);
            }
        }

        for (key, value) in self.rest.iter() {
            if !out.contains_key(key) {
                out.insert(key.clone(), value.clone());
            }
        }
        if let Some(value) = package_manager {
            out.entry(PACKAGE_MANAGER_KEY).or_insert(value);
        }
        if let Some(value) = workspaces {
            out.entry(WORKSPACES_KEY).or_insert(value);
        }

        Ok(Value::Object(out))
    }

    /// Pretty-printed with 2-space indentation and a trailing newline
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(&self.to_value()?)?;
        content.push('\n');
        Ok(content)
    }

    /// Write to `path`
    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        let content = self
            .to_pretty_string()
            .map_err(|e| Error::manifest_write(path.as_str(), e.to_string()))?;
        std::fs::write(path, content).map_err(|e| Error::manifest_write(path.as_str(), e.to_string()))
    }
}

/// What an update changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEdit {
    pub path: Utf8PathBuf,
    /// `packageManager` after the edit
    pub package_manager: Option<String>,
    /// Whether `workspaces` was overwritten
    pub workspaces_set: bool,
}

/// Apply `policy` for `chosen` to an in-memory manifest
///
/// `npm_version` is required when declaring npm.
pub fn apply_policy(
    manifest: &mut Manifest,
    chosen: PackageManager,
    policy: ManifestPolicy,
    npm_version: Option<&str>,
) -> Result<bool> {
    match policy {
        ManifestPolicy::Strip => {
            manifest.package_manager = None;
            Ok(false)
        }
        ManifestPolicy::Declare => {
            let declared = match chosen {
                PackageManager::Npm => {
                    let version = npm_version
                        .map(str::trim)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| Error::version_detection("npm", "no version reported"))?;
                    Some(format!("npm@{}", version))
                }
                PackageManager::Yarn => Some(format!("yarn@{}", YARN_VERSION)),
                PackageManager::Pnpm => None,
            };

            let Some(declared) = declared else {
                return Ok(false);
            };
            manifest.package_manager = Some(PackageManagerField::Declared(declared));
            manifest.workspaces = Some(Workspaces::Globs(
                WORKSPACE_GLOBS.iter().map(|g| g.to_string()).collect(),
            ));
            Ok(true)
        }
    }
}

/// Update `<project_dir>/package.json` for the chosen manager
///
/// Returns `None` without touching the file when the chosen manager is the
/// template's own (pnpm).
pub fn update_manifest(
    chosen: PackageManager,
    project_dir: &Utf8Path,
    policy: ManifestPolicy,
    npm_version: Option<&str>,
) -> Result<Option<ManifestEdit>> {
    if chosen.is_template_native() {
        debug!("{} is the template's native manager, leaving manifest untouched", chosen);
        return Ok(None);
    }

    let path = project_dir.join(MANIFEST_FILE);
    let mut manifest = Manifest::load(&path)?;
    let workspaces_set = apply_policy(&mut manifest, chosen, policy, npm_version)?;
    manifest.save(&path)?;

    info!(
        "Updated {} for {} ({} policy)",
        path, chosen, policy
    );

    Ok(Some(ManifestEdit {
        path,
        package_manager: manifest.declared_package_manager().map(str::to_string),
        workspaces_set,
    }))
}
