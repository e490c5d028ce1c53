//! Detect command implementation

use crate::config::{load_engine_config, CONFIG_ENV};
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use glossa_engine::{DetectionRequest, DetectionResult, LanguageDetector};
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};

/// Arguments for the detect command
#[derive(Debug, Args)]
pub struct DetectArgs {
    /// Text to detect
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Languages to leave alone, comma separated
    #[arg(long, value_name = "CODES", value_delimiter = ',')]
    pub noop: Vec<String>,

    /// Languages the author is known to write, comma separated
    #[arg(long, value_name = "CODES", value_delimiter = ',')]
    pub preferred: Vec<String>,

    /// Only ever answer with a preferred language
    #[arg(long)]
    pub limit_to_preferred: bool,

    /// Engine configuration file
    #[arg(short, long, value_name = "FILE", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Worker threads for file input (default: number of CPUs)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated line per input
    Text,
    /// JSON array of results
    Json,
}

impl OutputFormat {
    /// Formatter writing to `writer`
    pub fn formatter<W>(self, writer: W) -> Box<dyn OutputFormatter>
    where
        W: io::Write + Send + Sync + 'static,
    {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        }
    }
}

impl DetectArgs {
    /// Execute the detect command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {self:?}");

        if self.text.is_none() && self.input.is_empty() {
            return Err(CliError::NoInput.into());
        }

        let config = load_engine_config(self.config.as_deref())?;
        let detector =
            LanguageDetector::from_config(&config).context("Failed to build language detector")?;

        let mut formatter = self.format.formatter(io::stdout());

        if let Some(text) = &self.text {
            let result = detector
                .detect(&self.request(text))
                .context("Detection failed")?;
            formatter.format_result(None, &result)?;
        }

        if !self.input.is_empty() {
            let files = resolve_patterns(&self.input)?;
            log::info!("Detecting {} file(s)", files.len());
            for (path, result) in self.detect_files(&detector, &files)? {
                formatter.format_result(Some(&path.display().to_string()), &result)?;
            }
        }

        formatter.finish()
    }

    fn request(&self, text: &str) -> DetectionRequest {
        DetectionRequest::new(text)
            .with_noop_languages(self.noop.clone())
            .with_preferred_languages(self.preferred.clone())
            .limit_to_preferred(self.limit_to_preferred)
    }

    /// Detect every file on a dedicated pool, preserving input order
    fn detect_files<'a>(
        &self,
        detector: &LanguageDetector,
        files: &'a [PathBuf],
    ) -> Result<Vec<(&'a Path, DetectionResult)>> {
        let threads = self.threads.unwrap_or_else(num_cpus::get).max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to create thread pool")?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64, "files");

        let results = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let text = FileReader::read_text(path)?;
                    let result = detector
                        .detect(&self.request(&text))
                        .with_context(|| format!("Detection failed for {}", path.display()))?;
                    progress.file_completed(&path.display().to_string());
                    Ok((path.as_path(), result))
                })
                .collect::<Result<Vec<_>>>()
        });

        progress.finish();
        results
    }
}
