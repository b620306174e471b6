// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! uv-core: in-process event bus for tracking instrumentation
//!
//! This crate provides:
//! - `Bus` - emit events, listen with `on`/`once`, read the log with `map`
//! - `Selector` - exact, wildcard, regex and segment-glob type matching
//! - `EventLog` - append-only record of every dispatched event
//! - `Subscription` - dispose a listener or replay history into it
//!
//! Dispatch is synchronous and single-threaded. Events emitted from inside
//! a listener are queued and delivered in emission order once the current
//! listener pass completes.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod bus;
pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod global;
pub mod log;
pub mod profile;
pub mod registry;
pub mod selector;
pub mod subscription;

pub use bus::{Bus, BusBuilder};
pub use config::BusConfig;
pub use diagnostics::{Diagnostic, DiagnosticSink, LogLevel, RecordingSink, TracingSink};
pub use dispatch::DispatchState;
pub use error::{ConfigError, ListenerError, SelectorError};
pub use event::{Event, Fields, Meta, Payload};
pub use log::EventLog;
pub use profile::{Clock, FakeClock, IdGen, Profile, SequentialIdGen, SystemClock, UuidIdGen};
pub use registry::{Listener, ListenerOutcome};
pub use selector::Selector;
pub use subscription::Subscription;
