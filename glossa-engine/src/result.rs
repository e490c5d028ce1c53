//! Detection results and the source trace

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one detection call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Detected base code; `None` when the language is unknown or unsupported
    pub language: Option<String>,

    /// Confidence in `[0, 1]`
    pub confidence: f64,

    /// `+`-joined trace of the strategies and corrections that were applied
    pub source: String,

    /// True when the caller should leave the text alone: unsupported script,
    /// or a noop language outside the supported catalog
    pub noop: bool,
}

impl DetectionResult {
    /// Result for text in a script no strategy can handle
    pub fn unsupported_script() -> Self {
        Self {
            language: None,
            confidence: 0.0,
            source: "script".to_string(),
            noop: true,
        }
    }

    /// Detected code as `&str`
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.language {
            Some(code) => write!(f, "{code} ({:.2}, {})", self.confidence, self.source),
            None => write!(f, "unknown ({})", self.source),
        }
    }
}

/// Ordered list of pipeline steps that shaped a result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTrace {
    steps: Vec<&'static str>,
}

impl SourceTrace {
    /// Empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn push(&mut self, step: &'static str) {
        self.steps.push(step);
    }

    /// Whether `step` was recorded
    pub fn contains(&self, step: &str) -> bool {
        self.steps.iter().any(|s| *s == step)
    }
}

impl fmt::Display for SourceTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.steps.join("+"))
    }
}
