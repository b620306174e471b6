// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reading recorded events from JSON Lines

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// One line of input, ready to hand to `Bus::emit`
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub event_type: String,
    pub payload: Value,
}

/// Read every event from `source` (a path, or `-` for stdin)
pub fn read_events(source: &str) -> Result<Vec<Recorded>> {
    if source == "-" {
        parse_lines(io::stdin().lock(), "stdin")
    } else {
        let file = File::open(source).with_context(|| format!("failed to open {}", source))?;
        parse_lines(BufReader::new(file), source)
    }
}

pub fn parse_lines(reader: impl BufRead, source: &str) -> Result<Vec<Recorded>> {
    let mut events = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", source))?;
        if line.trim().is_empty() {
            continue;
        }
        let recorded = parse_line(&line).with_context(|| format!("{}:{}", source, i + 1))?;
        events.push(recorded);
    }
    Ok(events)
}

/// Parse one event line
///
/// The type comes from `meta.type`, or from a top-level `type` string when
/// there is no `meta`; the latter is removed from the payload.
pub fn parse_line(line: &str) -> Result<Recorded> {
    let value: Value = serde_json::from_str(line).context("invalid JSON")?;
    let Value::Object(mut fields) = value else {
        bail!("event must be a JSON object");
    };

    let from_meta = fields
        .get("meta")
        .and_then(|meta| meta.get("type"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let event_type = match from_meta {
        Some(t) => t,
        None if !fields.contains_key("meta") => match fields.remove("type") {
            Some(Value::String(t)) => t,
            _ => return Err(anyhow!("event has no type")),
        },
        None => bail!("meta.type must be a string"),
    };

    Ok(Recorded {
        event_type,
        payload: Value::Object(fields),
    })
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
