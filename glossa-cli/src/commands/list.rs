//! List command implementation

use crate::config::{load_engine_config, CONFIG_ENV};
use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use glossa_core::LanguageCatalog;
use std::io::{self, Write};
use std::path::PathBuf;

use super::detect::OutputFormat;

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List supported languages
    Languages {
        /// Engine configuration file
        #[arg(short, long, value_name = "FILE", env = CONFIG_ENV)]
        config: Option<PathBuf>,
    },

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Execute the list command
    pub fn execute(&self) -> Result<()> {
        let mut stdout = io::stdout().lock();
        match self {
            ListCommands::Languages { config } => {
                let config = load_engine_config(config.as_deref())?;
                write_languages(&mut stdout, &config.load_catalog()?)
            }
            ListCommands::Formats => write_formats(&mut stdout),
        }
    }
}

fn write_languages(out: &mut impl Write, catalog: &LanguageCatalog) -> Result<()> {
    writeln!(out, "Supported languages:")?;
    for info in catalog.iter() {
        writeln!(out, "  {:<4}{:<16}{:?}", info.code, info.name, info.script)?;
    }
    Ok(())
}

fn write_formats(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Available output formats:")?;
    for format in OutputFormat::value_variants() {
        if let Some(value) = format.to_possible_value() {
            let help = value.get_help().map(|h| h.to_string()).unwrap_or_default();
            writeln!(out, "  {:<6}{help}", value.get_name())?;
        }
    }
    Ok(())
}
