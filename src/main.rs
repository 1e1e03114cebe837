//! beamstep - launch Apache Beam pipelines from a CI build step
//!
//! ## Commands
//!
//! - `beamstep run` - Launch the pipeline and stream its output
//! - `beamstep command` - Print the command a step would run
//! - `beamstep validate` - Check the step's fields
//! - `beamstep completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Submit a Maven-built pipeline from the current workspace
//! beamstep run --main-class com.acme.WordCount --toolchain maven-java \
//!     --pipeline-options=--runner=DataflowRunner
//!
//! # Same step, from a step file
//! beamstep run --step beam-step.yaml --workspace ./pipeline
//!
//! # Show what would be launched
//! beamstep command --step beam-step.yaml
//! ```
//!
//! `run` exits with the toolchain's exit code.

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if std::env::var("BEAMSTEP_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
