// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the bus

use thiserror::Error;

/// Error returned by a listener callback.
///
/// Listener failures never escape the bus; they are reported to the
/// diagnostic sink and delivery continues.
pub type ListenerError = Box<dyn std::error::Error + 'static>;

/// Errors building a selector
#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("invalid selector pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors loading bus configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
