//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_engine::DetectionResult;
use std::io::Write;

/// Tab-separated text: `[input] language confidence source`
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_result(&mut self, label: Option<&str>, result: &DetectionResult) -> Result<()> {
        if let Some(label) = label {
            write!(self.writer, "{label}\t")?;
        }
        writeln!(
            self.writer,
            "{}\t{:.2}\t{}",
            result.language().unwrap_or("unknown"),
            result.confidence,
            result.source
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
