//! Validate command implementation

use crate::config::{load_engine_config, CONFIG_ENV};
use anyhow::Result;
use clap::Args;
use glossa_engine::{EngineConfig, LanguageDetector};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Engine configuration file
    #[arg(short, long, value_name = "FILE", env = CONFIG_ENV, required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        let outcome = load_engine_config(Some(&self.config)).and_then(|config| {
            let detector = LanguageDetector::from_config(&config)?;
            Ok((config, detector))
        });

        match outcome {
            Ok((config, detector)) => {
                println!("✓ Configuration is valid!");
                print_summary(&config, &detector);
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                Err(e)
            }
        }
    }
}

fn print_summary(config: &EngineConfig, detector: &LanguageDetector) {
    println!();
    println!("  Max length: {}", config.max_length);
    println!("  Supported languages: {}", detector.catalog().len());
    println!(
        "  N-gram profiles: {}",
        if detector.has_ngram() { "loaded" } else { "none" }
    );
    if let Some(dir) = &config.common_words.directory {
        println!("  Common words: {}", dir.display());
    }
    if let Some(dir) = &config.dictionary.word_lists {
        println!("  Dictionaries: {}", dir.display());
    }
    match detector.external_health() {
        Some(health) => println!("  External classifier: {health}"),
        None => println!("  External classifier: not configured"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_valid_minimal_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("glossa.toml");
        fs::write(&path, "max_length = 500\n").unwrap();

        ValidateArgs { config: path }.execute().unwrap();
    }

    #[test]
    fn test_missing_profile_dir_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("glossa.toml");
        fs::write(&path, "[ngram]\nprofiles = \"missing\"\n").unwrap();

        assert!(ValidateArgs { config: path }.execute().is_err());
    }
}
