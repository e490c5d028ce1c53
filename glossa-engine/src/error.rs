//! Layered error types
//!
//! Core errors are wrapped unchanged; everything the engine adds on top is a
//! configuration or argument problem detected before detection starts.

use crate::registry::Slot;
use glossa_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error raised by a core component
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// A caller-supplied argument is not acceptable
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded or applied
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A registry slot already holds a detector built from another configuration
    #[error("slot '{slot}' already holds a detector with a different configuration")]
    ConflictingConfiguration {
        /// Registry slot that was requested
        slot: Slot,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
