//! Prelude module for common imports

pub use crate::step::command::{build_command, render_command};
pub use crate::step::errors::{StepError, ValidationError};
pub use crate::step::types::{BeamStep, Toolchain, Validate};
pub use crate::step::validation::{FormValidation, check_path_to_main_class};

// Re-export executor types
pub use crate::executor::{LogSink, MemorySink, StepExecutor, StepRunner, run};
