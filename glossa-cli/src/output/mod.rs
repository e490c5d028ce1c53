//! Output formatting module

use anyhow::Result;
use glossa_engine::DetectionResult;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output one detection result; `label` names the input
    fn format_result(&mut self, label: Option<&str>, result: &DetectionResult) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
