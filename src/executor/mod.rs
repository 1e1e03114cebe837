//! Step execution layer
//!
//! This module contains the runner that launches a pipeline's toolchain, the
//! log sinks it writes to, and workspace resolution.

mod runner;
mod sink;
mod traits;
mod workspace;

pub use runner::{SIGNAL_EXIT_CODE, StepRunner, run};
pub use sink::{ConsoleSink, LogSink, MemorySink, WriterSink};
pub use traits::{HealthStatus, StepExecutor};
pub use workspace::WorkspaceResolver;
