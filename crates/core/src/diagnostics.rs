// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic output for the bus
//!
//! The bus reports what it is doing and which listeners failed through a
//! [`DiagnosticSink`]. A [`LogLevel`] gates records before they reach the
//! sink. Nothing here feeds back into dispatch.

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Message reported when a listener fails during dispatch
pub const LISTENER_FAILED: &str = "Error emitting UV event";

/// Message reported when a listener fails during replay
pub const REPLAY_FAILED: &str = "UV API Error";

/// Verbosity of diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    All,
    Info,
    #[default]
    Error,
    Off,
}

impl LogLevel {
    fn allows_info(self) -> bool {
        self <= LogLevel::Info
    }

    fn allows_error(self) -> bool {
        self <= LogLevel::Error
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::All => "all",
            LogLevel::Info => "info",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(LogLevel::All),
            "info" => Ok(LogLevel::Info),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Destination for bus diagnostics
pub trait DiagnosticSink {
    fn info(&self, message: &str);

    /// `detail` carries the failing listener's error text
    fn error(&self, message: &str, detail: &str);
}

/// Forwards diagnostics to `tracing`
#[derive(Clone, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!(target: "uv", "{}", message);
    }

    fn error(&self, message: &str, detail: &str) {
        tracing::error!(target: "uv", %detail, "{}", message);
    }
}

/// A diagnostic record captured by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Info(String),
    Error { message: String, detail: String },
}

/// Sink that keeps every record in memory, for tests
///
/// Clones share the same record list.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    records: Rc<RefCell<Vec<Diagnostic>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.borrow().clone()
    }

    pub fn errors(&self) -> Vec<(String, String)> {
        self.records
            .borrow()
            .iter()
            .filter_map(|r| match r {
                Diagnostic::Error { message, detail } => Some((message.clone(), detail.clone())),
                Diagnostic::Info(_) => None,
            })
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter_map(|r| match r {
                Diagnostic::Info(message) => Some(message.clone()),
                Diagnostic::Error { .. } => None,
            })
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn info(&self, message: &str) {
        self.records
            .borrow_mut()
            .push(Diagnostic::Info(message.to_string()));
    }

    fn error(&self, message: &str, detail: &str) {
        self.records.borrow_mut().push(Diagnostic::Error {
            message: message.to_string(),
            detail: detail.to_string(),
        });
    }
}

/// Level-gated handle the bus writes through
pub(crate) struct Diagnostics {
    level: Cell<LogLevel>,
    sink: RefCell<Rc<dyn DiagnosticSink>>,
}

impl Diagnostics {
    pub(crate) fn new(level: LogLevel, sink: Rc<dyn DiagnosticSink>) -> Self {
        Self {
            level: Cell::new(level),
            sink: RefCell::new(sink),
        }
    }

    pub(crate) fn level(&self) -> LogLevel {
        self.level.get()
    }

    pub(crate) fn set_level(&self, level: LogLevel) {
        self.level.set(level);
    }

    pub(crate) fn set_sink(&self, sink: Rc<dyn DiagnosticSink>) {
        *self.sink.borrow_mut() = sink;
    }

    fn sink(&self) -> Rc<dyn DiagnosticSink> {
        Rc::clone(&self.sink.borrow())
    }

    /// Message is built lazily so quiet buses skip the formatting
    pub(crate) fn info(&self, message: impl FnOnce() -> String) {
        if self.level.get().allows_info() {
            self.sink().info(&message());
        }
    }

    pub(crate) fn error(&self, message: &str, detail: &str) {
        if self.level.get().allows_error() {
            self.sink().error(message, detail);
        }
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
