//! Step execution traits
//!
//! This module defines the interface an orchestration layer uses to run a
//! build step.

use super::sink::LogSink;
use crate::step::{BeamStep, StepError};
use std::path::Path;

/// Trait for executing build steps
#[allow(clippy::missing_errors_doc)]
pub trait StepExecutor: Send + Sync {
    /// Runs the step in `working_dir` and returns the toolchain's exit code
    fn execute(
        &self,
        step: &BeamStep,
        working_dir: &Path,
        sink: &dyn LogSink,
    ) -> Result<i32, StepError>;

    /// Logs what would run without starting a process
    fn dry_run(&self, step: &BeamStep, sink: &dyn LogSink) -> Result<i32, StepError>;

    /// Checks whether the step's toolchain can be launched
    fn health_check(&self, step: &BeamStep) -> HealthStatus;
}

/// Health status of an executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Executor is healthy
    Healthy,

    /// Executor is unhealthy
    Unhealthy {
        /// Reason for being unhealthy
        reason: String,
    },
}

impl HealthStatus {
    /// Returns true if executor is healthy
    #[must_use]
    pub fn is_operational(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}
