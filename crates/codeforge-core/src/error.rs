//! Error types for codeforge-core

use thiserror::Error;

/// Result type alias using codeforge-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Target project directory already exists
    #[error("Folder \"{name}\" already exists")]
    ProjectExists { name: String },

    /// Invalid project name
    #[error("Invalid project name: {name}. {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// Invalid branch name
    #[error("Invalid branch name: {branch}")]
    InvalidBranch { branch: String },

    /// Template branch does not exist upstream
    #[error("Template branch \"{branch}\" not found in {repository}")]
    BranchNotFound { repository: String, branch: String },

    /// Template download or extraction failed
    #[error("Failed to fetch template: {message}")]
    TemplateFetch { message: String },

    /// No package manager could be resolved
    #[error("No package managers detected. Please install npm, yarn, or pnpm")]
    NoManagerFound,

    /// Executable lookup failed
    #[error("{name} not detected: {message}")]
    ExecutableNotFound { name: String, message: String },

    /// git init did not succeed
    #[error("Git initialization failed: {message}")]
    GitInit { message: String },

    /// Manifest missing or not valid JSON
    #[error("Failed to read {path}: {message}")]
    ManifestUnreadable { path: String, message: String },

    /// Manifest could not be written back
    #[error("Failed to write {path}: {message}")]
    ManifestWrite { path: String, message: String },

    /// Package manager version could not be determined
    #[error("Failed to determine {manager} version: {message}")]
    VersionDetection { manager: String, message: String },

    /// A cleanup artifact could not be removed
    #[error("Failed to remove {path}: {message}")]
    Cleanup { path: String, message: String },

    /// Dependency installation failed
    #[error("Failed to install dependencies with {manager}: {message}")]
    InstallFailed { manager: String, message: String },

    /// Process execution error
    #[error("Process execution failed: {0}")]
    ProcessExecution(String),

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Interactive prompt failed
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a project exists error
    pub fn project_exists(name: impl Into<String>) -> Self {
        Self::ProjectExists { name: name.into() }
    }

    /// Create an invalid project name error
    pub fn invalid_project_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid branch error
    pub fn invalid_branch(branch: impl Into<String>) -> Self {
        Self::InvalidBranch {
            branch: branch.into(),
        }
    }

    /// Create a branch not found error
    pub fn branch_not_found(repository: impl Into<String>, branch: impl Into<String>) -> Self {
        Self::BranchNotFound {
            repository: repository.into(),
            branch: branch.into(),
        }
    }

    /// Create a template fetch error
    pub fn template_fetch(message: impl Into<String>) -> Self {
        Self::TemplateFetch {
            message: message.into(),
        }
    }

    /// Create an executable not found error
    pub fn executable_not_found(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExecutableNotFound {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a git init error
    pub fn git_init(message: impl Into<String>) -> Self {
        Self::GitInit {
            message: message.into(),
        }
    }

    /// Create a manifest unreadable error
    pub fn manifest_unreadable(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ManifestUnreadable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a manifest write error
    pub fn manifest_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ManifestWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a version detection error
    pub fn version_detection(manager: impl Into<String>, message: impl Into<String>) -> Self {
        Self::VersionDetection {
            manager: manager.into(),
            message: message.into(),
        }
    }

    /// Create a cleanup error
    pub fn cleanup(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Cleanup {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an install failed error
    pub fn install_failed(manager: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InstallFailed {
            manager: manager.into(),
            message: message.into(),
        }
    }

    /// Create a process execution error
    pub fn process_execution(message: impl Into<String>) -> Self {
        Self::ProcessExecution(message.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }

    /// Whether this error aborts the scaffolding run
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::GitInit { .. }
                | Self::ManifestUnreadable { .. }
                | Self::ManifestWrite { .. }
                | Self::VersionDetection { .. }
                | Self::Cleanup { .. }
                | Self::ExecutableNotFound { .. }
        )
    }
}
