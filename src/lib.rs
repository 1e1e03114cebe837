//! # Beamstep - launch Apache Beam pipelines from a CI build step
//!
//! Beamstep turns a handful of build-step fields (the pipeline's entry point,
//! pipeline options, build/release options and a toolchain) into one
//! `gradle`, `mvn` or `python` invocation that submits an Apache Beam
//! pipeline to Dataflow, then runs it and streams its output to a build log.
//!
//! ## Quick Start
//!
//! ```rust
//! use beamstep::{build_command, BeamStep, Toolchain, Validate};
//!
//! let step = BeamStep::new("com.acme.Main", "--runner=DataflowRunner", "", Toolchain::MavenJava);
//! assert!(step.validate().is_ok());
//! assert_eq!(build_command(&step)[0], "mvn");
//! ```
//!
//! ## Modules
//!
//! - [`step`]: the configuration record, command builder and field checks
//! - [`executor`]: launching the toolchain and forwarding its output
//! - [`infrastructure`]: configuration file and logging setup
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod executor;
pub mod infrastructure;
pub mod step;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use executor::{
    ConsoleSink, HealthStatus, LogSink, MemorySink, SIGNAL_EXIT_CODE, StepExecutor, StepRunner,
    WorkspaceResolver, WriterSink, run,
};
pub use infrastructure::{Config, LOG_LEVEL_ENV, init_logging};
pub use step::{
    BeamStep, DISPLAY_NAME, FormValidation, StepError, Toolchain, Validate, ValidationError,
    build_command, check_path_to_main_class, render_command,
};

/// Version of the beamstep crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
