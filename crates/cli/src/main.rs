// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! uv - feed recorded tracking events through an event bus

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod input;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{play, types};
use std::path::{Path, PathBuf};
use uv_core::{Bus, BusConfig, LogLevel};

#[derive(Parser)]
#[command(
    name = "uv",
    version,
    about = "Universal Variable - replay recorded tracking events through an event bus"
)]
struct Cli {
    /// Bus configuration file (default: <config dir>/uv/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Diagnostic verbosity: all, info, error, off
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit recorded events and print the ones a listener receives
    Play(play::PlayArgs),
    /// Count recorded events by type
    Types(types::TypesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    setup_logging(config.log_level);

    let bus = Bus::from_config(&config);
    match cli.command {
        Commands::Play(args) => play::run(&bus, args),
        Commands::Types(args) => types::run(&bus, args),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<BusConfig> {
    if let Some(path) = explicit {
        return BusConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    match dirs::config_dir() {
        Some(dir) => {
            let path = dir.join("uv").join("config.toml");
            BusConfig::load_or_default(&path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        None => Ok(BusConfig::default()),
    }
}

fn setup_logging(level: LogLevel) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Bus diagnostics are emitted under the `uv` target
    let default = match level {
        LogLevel::All | LogLevel::Info => "warn,uv=info",
        LogLevel::Error | LogLevel::Off => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .init();
}
