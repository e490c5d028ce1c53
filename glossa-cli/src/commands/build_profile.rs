//! Build-profile command implementation

use crate::error::CliError;
use crate::input::FileReader;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use glossa_core::NgramProfile;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the build-profile command
#[derive(Debug, Args)]
pub struct BuildProfileArgs {
    /// Directory of `<code>.txt` training corpora
    #[arg(long, value_name = "DIR")]
    pub corpus: PathBuf,

    /// Directory receiving `<code>.json` profiles
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Drop n-grams seen fewer times than this
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub min_count: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl BuildProfileArgs {
    /// Execute the build-profile command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        let corpora = corpus_files(&self.corpus)?;
        fs::create_dir_all(&self.output)
            .with_context(|| format!("Failed to create {}", self.output.display()))?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(corpora.len() as u64, "corpora");

        let mut written = 0;
        for (code, path) in &corpora {
            let text = FileReader::read_text(path)?;
            let mut profile = NgramProfile::train(code.as_str(), &text);
            profile.prune(self.min_count);
            if profile.is_empty() {
                log::warn!("Corpus {} produced an empty profile, skipping", path.display());
                progress.file_completed(code);
                continue;
            }

            let target = self.output.join(format!("{code}.json"));
            profile
                .save(&target)
                .with_context(|| format!("Failed to write profile {}", target.display()))?;
            log::info!("Wrote {} ({} n-grams)", target.display(), profile.freq.len());
            written += 1;
            progress.file_completed(code);
        }

        progress.finish();
        if !self.quiet {
            println!("✓ Built {written} profile(s) in {}", self.output.display());
        }
        Ok(())
    }
}

/// `(code, path)` for every `<code>.txt` in `dir`, sorted by code
fn corpus_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !dir.is_dir() {
        return Err(CliError::FileNotFound(dir.display().to_string()).into());
    }

    let mut corpora = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        if let Some(code) = FileReader::language_code(&path) {
            corpora.push((code.to_string(), path.clone()));
        }
    }

    if corpora.is_empty() {
        anyhow::bail!("No <code>.txt corpora found in {}", dir.display());
    }
    corpora.sort();
    Ok(corpora)
}
