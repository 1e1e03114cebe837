//! Infrastructure layer
//!
//! Configuration loading and logging setup.

mod config;
mod logging;

pub use config::{Config, LOG_LEVEL_ENV};
pub use logging::init_logging;
