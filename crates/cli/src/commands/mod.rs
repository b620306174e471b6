// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod play;
pub mod types;

use crate::input::Recorded;
use uv_core::Bus;

/// Emit recorded events in input order
pub(crate) fn emit_all(bus: &Bus, events: Vec<Recorded>) {
    for recorded in events {
        bus.emit(recorded.event_type, recorded.payload);
    }
}
