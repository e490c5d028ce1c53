//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_engine::DetectionResult;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs results as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: Vec<DetectionRecord>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Input file, absent for inline text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Detected language code, null when unknown
    pub language: Option<String>,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// Pipeline trace
    pub source: String,
    /// Whether the text should be left alone
    pub noop: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_result(&mut self, label: Option<&str>, result: &DetectionResult) -> Result<()> {
        self.records.push(DetectionRecord {
            input: label.map(str::to_string),
            language: result.language.clone(),
            confidence: result.confidence,
            source: result.source.clone(),
            noop: result.noop,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn german() -> DetectionResult {
        DetectionResult {
            language: Some("de".to_string()),
            confidence: 0.9,
            source: "ngram".to_string(),
            noop: false,
        }
    }

    #[test]
    fn test_json_array_output() {
        let mut buffer = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut buffer);
            formatter.format_result(Some("a.txt"), &german()).unwrap();
            formatter
                .format_result(None, &DetectionResult::unsupported_script())
                .unwrap();
            formatter.finish().unwrap();
        }

        let records: Vec<DetectionRecord> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].input.as_deref(), Some("a.txt"));
        assert_eq!(records[0].language.as_deref(), Some("de"));
        assert!(records[1].input.is_none());
        assert!(records[1].language.is_none());
        assert!(records[1].noop);
    }

    #[test]
    fn test_empty_output_is_empty_array() {
        let mut buffer = Vec::new();
        JsonFormatter::new(&mut buffer).finish().unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().trim(), "[]");
    }
}
