//! Core types for package manager resolution and template adaptation

use serde::{Deserialize, Serialize};

/// Upstream template repository (`owner/name` on GitHub)
pub const TEMPLATE_REPOSITORY: &str = "Jack-WebDev/codeforge";

/// Branches offered by the interactive branch prompt
pub const TEMPLATE_BRANCHES: &[&str] = &["main", "dev", "test"];

/// Yarn release declared in `packageManager` when yarn is chosen
pub const YARN_VERSION: &str = "1.22.19";

/// Workspace globs declared for npm and yarn projects
pub const WORKSPACE_GLOBS: &[&str] = &["apps/*", "packages/*"];

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// All managers in probe priority order
    pub fn all() -> [Self; 3] {
        [Self::Pnpm, Self::Yarn, Self::Npm]
    }

    /// Executable name, also used as the display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Whether the template ships configured for this manager
    pub fn is_template_native(&self) -> bool {
        matches!(self, Self::Pnpm)
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s_lower = s.trim().to_lowercase();
        Self::all()
            .into_iter()
            .find(|pm| pm.as_str() == s_lower)
            .ok_or_else(|| format!("Unknown package manager: {}. Valid managers: pnpm, yarn, npm", s))
    }
}

/// Package managers found on the host, in probe priority order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableManagers(Vec<PackageManager>);

impl AvailableManagers {
    /// Build from any iterator, normalizing to probe priority order and
    /// dropping duplicates
    pub fn new(managers: impl IntoIterator<Item = PackageManager>) -> Self {
        let found: Vec<PackageManager> = managers.into_iter().collect();
        Self(
            PackageManager::all()
                .into_iter()
                .filter(|pm| found.contains(pm))
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[PackageManager] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<PackageManager> {
        self.0.first().copied()
    }

    pub fn contains(&self, pm: PackageManager) -> bool {
        self.0.contains(&pm)
    }
}

/// How to pick among several available managers when no hint is present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Ask the user to choose
    #[default]
    Prompt,
    /// Take the first manager in probe priority order
    First,
}

impl SelectionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::First => "first",
        }
    }
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prompt" => Ok(Self::Prompt),
            "first" => Ok(Self::First),
            other => Err(format!(
                "Unknown selection policy: {}. Valid policies: prompt, first",
                other
            )),
        }
    }
}

/// What to do with the manifest's `packageManager` field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestPolicy {
    /// Declare `<manager>@<version>` and npm/yarn workspaces
    #[default]
    Declare,
    /// Remove the field
    Strip,
}

impl ManifestPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Declare => "declare",
            Self::Strip => "strip",
        }
    }
}

impl std::fmt::Display for ManifestPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ManifestPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "declare" => Ok(Self::Declare),
            "strip" => Ok(Self::Strip),
            other => Err(format!(
                "Unknown manifest policy: {}. Valid policies: declare, strip",
                other
            )),
        }
    }
}
