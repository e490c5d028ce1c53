//! glossa command-line entry point

use anyhow::Result;
use clap::Parser;
use glossa_cli::commands::Commands;

/// Ensemble language detection
#[derive(Debug, Parser)]
#[command(name = "glossa", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => args.execute(),
        Commands::List { subcommand } => subcommand.execute(),
        Commands::BuildProfile(args) => args.execute(),
        Commands::GenerateConfig(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
    }
}
