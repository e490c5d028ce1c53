//! CLI command implementations

use clap::Subcommand;

pub mod build_profile;
pub mod detect;
pub mod generate_config;
pub mod list;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect the language of text or files
    Detect(detect::DetectArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: list::ListCommands,
    },

    /// Train n-gram profiles from plain-text corpora
    BuildProfile(build_profile::BuildProfileArgs),

    /// Generate an engine configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Validate an engine configuration
    Validate(validate::ValidateArgs),
}

/// Install `env_logger` with a verbosity-derived default filter.
///
/// `RUST_LOG` still wins. Repeated calls are ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}
