//! Core types for the build step
//!
//! [`BeamStep`] is the configuration record a job definition carries. It is
//! built once and only read afterwards: every field is private and exposed
//! through a getter.

#![allow(clippy::must_use_candidate)]

use super::errors::{StepError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Name shown for the step in job configuration screens and logs
pub const DISPLAY_NAME: &str = "Execute Beam Pipeline on Dataflow";

/// Toolchain used to launch the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Toolchain {
    /// Java pipeline built and executed with Gradle
    GradleJava,
    /// Java pipeline built and executed with Maven
    MavenJava,
    /// Python pipeline run as a module
    Python,
}

impl Toolchain {
    /// Maps the legacy `useJava` / `useGradle` checkbox pair onto a toolchain.
    ///
    /// `use_gradle` is ignored when `use_java` is false.
    pub fn from_flags(use_java: bool, use_gradle: bool) -> Self {
        match (use_java, use_gradle) {
            (true, true) => Self::GradleJava,
            (true, false) => Self::MavenJava,
            (false, _) => Self::Python,
        }
    }

    /// Returns true for both Java toolchains
    pub fn use_java(self) -> bool {
        matches!(self, Self::GradleJava | Self::MavenJava)
    }

    /// Returns true only for Gradle
    pub fn use_gradle(self) -> bool {
        matches!(self, Self::GradleJava)
    }

    /// Executable launched for this toolchain
    pub fn program(self) -> &'static str {
        match self {
            Self::GradleJava => "gradle",
            Self::MavenJava => "mvn",
            Self::Python => "python",
        }
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::from_flags(false, false)
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GradleJava => write!(f, "gradle-java"),
            Self::MavenJava => write!(f, "maven-java"),
            Self::Python => write!(f, "python"),
        }
    }
}

impl FromStr for Toolchain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gradle-java" | "gradle" => Ok(Self::GradleJava),
            "maven-java" | "maven" | "mvn" => Ok(Self::MavenJava),
            "python" => Ok(Self::Python),
            _ => Err(ValidationError::InvalidToolchain(s.to_string())),
        }
    }
}

/// Configuration of one "Execute Beam Pipeline on Dataflow" build step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StepFile", into = "StepFile")]
pub struct BeamStep {
    path_to_main_class: String,
    pipeline_options: String,
    build_release_options: String,
    toolchain: Toolchain,
}

impl BeamStep {
    /// Creates a new step configuration
    pub fn new(
        path_to_main_class: impl Into<String>,
        pipeline_options: impl Into<String>,
        build_release_options: impl Into<String>,
        toolchain: Toolchain,
    ) -> Self {
        Self {
            path_to_main_class: path_to_main_class.into(),
            pipeline_options: pipeline_options.into(),
            build_release_options: build_release_options.into(),
            toolchain,
        }
    }

    /// Creates a step from the five job form fields
    pub fn from_flags(
        path_to_main_class: impl Into<String>,
        pipeline_options: impl Into<String>,
        build_release_options: impl Into<String>,
        use_java: bool,
        use_gradle: bool,
    ) -> Self {
        Self::new(
            path_to_main_class,
            pipeline_options,
            build_release_options,
            Toolchain::from_flags(use_java, use_gradle),
        )
    }

    /// Parses a step from YAML
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Parse`] if the document is not a valid step.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, StepError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a step from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StepError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Serializes the step to YAML
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Parse`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, StepError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Fully-qualified entry point (class name or Python module)
    pub fn path_to_main_class(&self) -> &str {
        &self.path_to_main_class
    }

    /// Extra pipeline arguments, passed through verbatim
    pub fn pipeline_options(&self) -> &str {
        &self.pipeline_options
    }

    /// Extra build/release arguments, passed through verbatim
    pub fn build_release_options(&self) -> &str {
        &self.build_release_options
    }

    /// Selected toolchain
    pub fn toolchain(&self) -> Toolchain {
        self.toolchain
    }

    /// Legacy `useJava` flag
    pub fn use_java(&self) -> bool {
        self.toolchain.use_java()
    }

    /// Legacy `useGradle` flag
    pub fn use_gradle(&self) -> bool {
        self.toolchain.use_gradle()
    }

    /// Name shown for the step
    pub fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }
}

/// On-disk shape of a step file.
///
/// Accepts either an explicit `toolchain` or the legacy checkbox pair. When both
/// are present the explicit toolchain wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StepFile {
    #[serde(default)]
    path_to_main_class: String,
    #[serde(default)]
    pipeline_options: String,
    #[serde(default)]
    build_release_options: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    toolchain: Option<Toolchain>,
    #[serde(default, skip_serializing)]
    use_java: Option<bool>,
    #[serde(default, skip_serializing)]
    use_gradle: Option<bool>,
}

impl From<StepFile> for BeamStep {
    fn from(file: StepFile) -> Self {
        let toolchain = file.toolchain.unwrap_or_else(|| {
            Toolchain::from_flags(
                file.use_java.unwrap_or(false),
                file.use_gradle.unwrap_or(false),
            )
        });
        Self::new(
            file.path_to_main_class,
            file.pipeline_options,
            file.build_release_options,
            toolchain,
        )
    }
}

impl From<BeamStep> for StepFile {
    fn from(step: BeamStep) -> Self {
        Self {
            path_to_main_class: step.path_to_main_class,
            pipeline_options: step.pipeline_options,
            build_release_options: step.build_release_options,
            toolchain: Some(step.toolchain),
            use_java: None,
            use_gradle: None,
        }
    }
}

/// Trait for types that can be validated
#[allow(clippy::missing_errors_doc)]
pub trait Validate {
    /// Type of validation error
    type Error;

    /// Validates this type
    fn validate(&self) -> std::result::Result<(), Self::Error>;
}
