//! Error types for the build step

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or running a build step
#[derive(Error, Debug)]
pub enum StepError {
    /// Validation failed with specified reason
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The toolchain program could not be started
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        /// Program that was being launched.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Working directory does not exist
    #[error("Workspace not found: {}", .0.display())]
    WorkspaceNotFound(PathBuf),

    /// Step file could not be parsed
    #[error("Invalid step file: {0}")]
    Parse(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for StepError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Validation errors for step fields
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Entry point cannot be empty
    #[error("Missing path to main class.")]
    MissingMainClass,

    /// Unknown toolchain name
    #[error("Invalid toolchain: '{0}' (expected gradle-java, maven-java or python)")]
    InvalidToolchain(String),
}
