// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uv types` - count recorded events by type

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::fmt;
use uv_core::Bus;

use super::emit_all;
use crate::input;
use crate::output::{print_list, OutputFormat};

#[derive(Args)]
pub struct TypesArgs {
    /// JSON Lines file of recorded events ("-" reads stdin)
    #[arg(default_value = "-")]
    pub input: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub event_type: String,
    pub count: usize,
}

impl fmt::Display for TypeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.event_type, self.count)
    }
}

pub fn run(bus: &Bus, args: TypesArgs) -> Result<()> {
    emit_all(bus, input::read_events(&args.input)?);

    let types = bus.map(|_, event, _| event.event_type().to_string());
    print_list(&count_types(types), args.format)?;
    Ok(())
}

/// Tally types, keeping first-seen order
pub fn count_types(types: Vec<String>) -> Vec<TypeCount> {
    let mut counts: Vec<TypeCount> = Vec::new();
    for event_type in types {
        match counts.iter_mut().find(|c| c.event_type == event_type) {
            Some(existing) => existing.count += 1,
            None => counts.push(TypeCount {
                event_type,
                count: 1,
            }),
        }
    }
    counts
}
