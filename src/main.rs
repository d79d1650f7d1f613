//! HORI controller configuration CLI
//!
//! Reads and writes the configuration memory of HORI GIP controllers.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use hori_driver::config::HoriConfig;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;
use commands::{CommandResult, Context};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CommandResult {
    let config_path = cli.config.unwrap_or_else(HoriConfig::default_path);
    let config = HoriConfig::load(&config_path)?;
    debug!("Config from {}: {config:?}", config_path.display());

    let ctx = Context {
        device: cli.device.unwrap_or(config.device),
        timing: config.timing(),
    };

    match cli.command {
        Commands::Devices => commands::utility::devices(),
        Commands::Version => commands::utility::version(&ctx),

        // === Memory Commands ===
        Commands::Hexdump { profile, ofs, size } => {
            commands::memory::hexdump(&ctx, profile, ofs, size)
        }
        Commands::Write { profile, ofs, data } => {
            commands::memory::write(&ctx, profile, ofs, &data)
        }

        // === Profile Commands ===
        Commands::Profile { profile } => commands::profile::profile(&ctx, profile),
        Commands::Map { profile, mappings } => commands::profile::map(&ctx, profile, &mappings),
        Commands::Reset { profile } => commands::profile::reset(&ctx, profile),
        Commands::Name { profile, name } => {
            commands::profile::name(&ctx, profile, name.as_deref())
        }
        Commands::Stick { profile, stick } => commands::profile::stick(&ctx, profile, stick),
        Commands::Info => commands::profile::info(&ctx),
    }
}
