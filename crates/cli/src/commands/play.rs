// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uv play` - emit recorded events and print what a listener receives

use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use tracing::info;
use uv_core::{Bus, Event, ListenerError, Selector};

use super::emit_all;
use crate::input;

#[derive(Args)]
pub struct PlayArgs {
    /// JSON Lines file of recorded events ("-" reads stdin)
    #[arg(default_value = "-")]
    pub input: String,

    /// Exact event type to listen for ("*" for all)
    #[arg(long, conflicts_with_all = ["pattern", "glob"])]
    pub select: Option<String>,

    /// Regular expression tested against event types
    #[arg(long, conflicts_with = "glob")]
    pub pattern: Option<String>,

    /// Colon-segment glob such as "ec:*" or "ec:**"
    #[arg(long)]
    pub glob: Option<String>,

    /// Attach the listener after emitting and catch up with replay
    #[arg(long)]
    pub replay: bool,
}

impl PlayArgs {
    fn selector(&self) -> Result<Selector> {
        Ok(match (&self.select, &self.pattern, &self.glob) {
            (Some(select), _, _) => Selector::from(select.as_str()),
            (_, Some(pattern), _) => Selector::pattern(pattern)?,
            (_, _, Some(glob)) => Selector::glob(glob)?,
            _ => Selector::Any,
        })
    }
}

pub fn run(bus: &Bus, args: PlayArgs) -> Result<()> {
    let selector = args.selector()?;
    let events = input::read_events(&args.input)?;
    let count = events.len();

    if args.replay {
        emit_all(bus, events);
        bus.on(selector, print_event).replay();
    } else {
        bus.on(selector, print_event);
        emit_all(bus, events);
    }

    info!(count, "played events");
    Ok(())
}

fn print_event(_: &(), event: &Event) -> Result<(), ListenerError> {
    let line = serde_json::to_string(event)?;
    writeln!(io::stdout().lock(), "{}", line)?;
    Ok(())
}
