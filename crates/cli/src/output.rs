// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print a list of items, one per line as text or as a JSON array
pub fn print_list<T: Serialize + Display>(items: &[T], format: OutputFormat) -> io::Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            for item in items {
                writeln!(out, "{}", item)?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).map_err(io::Error::other)?;
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}
