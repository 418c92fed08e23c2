//! Error types for downgrade-build

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for downgrade-build operations
#[derive(Error, Debug)]
pub enum DowngradeError {
    /// Project-related errors
    #[error("Project root not found: {path}")]
    ProjectRootNotFound { path: PathBuf },

    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    #[error("Invalid manifest: {reason}")]
    InvalidManifest { reason: String },

    /// Dependency minimization errors
    #[error("No minimum version satisfies `{range}` for dependency `{name}`")]
    NoMinimumVersion { name: String, range: String },

    /// Package-manager invocation errors
    #[error("Command `{command}` exited with status code {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("Command `{command}` was terminated by a signal")]
    CommandTerminated { command: String },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl DowngradeError {
    /// Create a new project root not found error
    pub fn project_root_not_found(path: PathBuf) -> Self {
        Self::ProjectRootNotFound { path }
    }

    /// Create a new manifest not found error
    pub fn manifest_not_found(path: PathBuf) -> Self {
        Self::ManifestNotFound { path }
    }

    /// Create a new invalid manifest error
    pub fn invalid_manifest(reason: impl Into<String>) -> Self {
        Self::InvalidManifest {
            reason: reason.into(),
        }
    }

    /// Create a new no-minimum-version error
    pub fn no_minimum_version(name: impl Into<String>, range: impl Into<String>) -> Self {
        Self::NoMinimumVersion {
            name: name.into(),
            range: range.into(),
        }
    }

    /// Create a new command failed error
    pub fn command_failed(command: impl Into<String>, code: i32) -> Self {
        Self::CommandFailed {
            command: command.into(),
            code,
        }
    }

    /// Create a new command terminated error
    pub fn command_terminated(command: impl Into<String>) -> Self {
        Self::CommandTerminated {
            command: command.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration_error(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for downgrade-build operations
pub type Result<T> = std::result::Result<T, DowngradeError>;
