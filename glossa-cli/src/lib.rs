//! glossa CLI library
//!
//! Command-line interface for the glossa ensemble language detector.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
