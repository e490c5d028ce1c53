//! Core error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while constructing core components.
///
/// Scoring itself never fails for ordinary text; everything here is a
/// misuse of the construction contract or unreadable data files.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Maximum text length below the supported minimum
    #[error("max length must be >= {min} (values > 100 are recommended), got {given}")]
    InvalidMaxLength {
        /// Length that was requested
        given: usize,
        /// Smallest accepted length
        min: usize,
    },

    /// An n-gram profile could not be read
    #[error("failed to read profile {path}: {source}")]
    ProfileIo {
        /// Profile file or directory
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// An n-gram profile is not valid JSON or has the wrong shape
    #[error("failed to parse profile {path}: {reason}")]
    ProfileFormat {
        /// Offending profile file, or the profile name for in-memory profiles
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// A profile directory contained no usable profiles
    #[error("no n-gram profiles found in {0}")]
    NoProfiles(PathBuf),

    /// A word list could not be read
    #[error("failed to read word list {path}: {source}")]
    WordListIo {
        /// Word list file or directory
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The language catalog is malformed
    #[error("invalid language catalog: {0}")]
    Catalog(String),
}

/// Failure of a single scoring call.
///
/// Only external scorers produce these; the in-process scorers are total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScorerError {
    /// The scorer failed for this call but may succeed later
    #[error("transient scorer failure: {0}")]
    Transient(String),

    /// The scorer has been switched off for the rest of its lifetime
    #[error("scorer disabled after repeated failures")]
    Disabled,
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
