//! Client configuration and constants.
//!
//! This module provides:
//! - Default values for every recognized option
//! - Header names and passthrough keys used by the pipeline
//! - The `ClientOptions` type and CLI logging enums
//! - The command-line interface of the binary

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::Cli;
pub use constants::*;
pub use types::{ClientOptions, LogFormat, LogLevel};
