//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use glossa_engine::config::{DEFAULT_MAX_LENGTH, DEFAULT_MAX_RESTARTS, DEFAULT_TOP_K};
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists, pass --force to overwrite",
                self.output.display()
            );
        }

        println!("Generating engine configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Build n-gram profiles from your corpora:");
        println!("   glossa build-profile --corpus corpus/ --output profiles/");
        println!("2. Validate your configuration:");
        println!("   glossa validate -c {}", self.output.display());
        println!("3. Use it for detection:");
        println!("   glossa detect -c {} \"some text\"", self.output.display());

        Ok(())
    }
}

/// Commented engine configuration with every section
pub fn template() -> String {
    format!(
        r#"# glossa engine configuration
# Relative paths are resolved against the directory of this file.

# Characters of input inspected per request (minimum 10)
max_length = {DEFAULT_MAX_LENGTH}

# Restrict answers to these base codes; empty keeps the whole catalog
supported = []

# Custom catalog file with [[language]] entries (code, name, script)
# catalog = "languages.toml"

[ngram]
# Directory of JSON profiles, see `glossa build-profile`
profiles = "profiles"

[common_words]
# Directory of <code>.txt lists, one word per line
directory = "common-words"

[dictionary]
# Directory of <code>.txt word lists used as spellers
# word_lists = "dictionaries"

# External fastText-compatible classifier
# [external]
# binary = "/usr/local/bin/fasttext"
# model = "lid.176.bin"
# top_k = {DEFAULT_TOP_K}
# max_restarts = {DEFAULT_MAX_RESTARTS}
"#
    )
}
