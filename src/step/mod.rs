//! Build step domain: configuration record, command builder and field checks

pub mod command;
pub mod errors;
pub mod types;
pub mod validation;


pub use command::{build_command, render_command};
pub use errors::{StepError, ValidationError};
pub use types::{BeamStep, DISPLAY_NAME, Toolchain, Validate};
pub use validation::{FormValidation, check_path_to_main_class};
