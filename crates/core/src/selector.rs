// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Selectors decide which event types a listener receives

use crate::error::SelectorError;
use regex::Regex;
use std::fmt;

/// Wildcard marker accepted by `From<&str>`
pub const WILDCARD: &str = "*";

/// Matching rule for a listener
///
/// Supports:
///   - Any: `"*"` matches every event type
///   - Exact: `"ec:product.view"` matches only that type, case-sensitively
///   - Pattern: a regular expression tested (unanchored) against the type
#[derive(Clone, Debug)]
pub enum Selector {
    Any,
    Exact(String),
    Pattern(Regex),
}

impl Selector {
    /// Compile a regular expression selector
    pub fn pattern(pattern: &str) -> Result<Self, SelectorError> {
        Regex::new(pattern)
            .map(Selector::Pattern)
            .map_err(|source| SelectorError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Compile a colon-segmented glob into a selector
    ///
    /// `ec:*` matches one segment (`ec:basket`, not `ec:basket:add`),
    /// `ec:**` matches everything after the prefix, and a lone `*` or `**`
    /// matches every type. An empty glob matches nothing.
    pub fn glob(glob: &str) -> Result<Self, SelectorError> {
        if glob == "*" || glob == "**" {
            return Ok(Selector::Any);
        }
        if glob.is_empty() {
            return Self::pattern(r"[^\s\S]");
        }

        let mut source = String::from("^");
        for (i, segment) in glob.split(':').enumerate() {
            if segment == "**" {
                // ** swallows the separator too, so `ec:**` also matches `ec`
                source.push_str(if i == 0 { ".*" } else { "(?::.*)?" });
                source.push('$');
                return Self::pattern(&source);
            }
            if i > 0 {
                source.push(':');
            }
            if segment == "*" {
                source.push_str("[^:]*");
            } else {
                source.push_str(&regex::escape(segment));
            }
        }
        source.push('$');
        Self::pattern(&source)
    }

    /// Check if this selector matches an event type
    pub fn matches(&self, event_type: &str) -> bool {
        match self {
            Selector::Any => true,
            Selector::Exact(expected) => expected == event_type,
            Selector::Pattern(regex) => regex.is_match(event_type),
        }
    }
}

impl From<&str> for Selector {
    fn from(selector: &str) -> Self {
        if selector == WILDCARD {
            Selector::Any
        } else {
            Selector::Exact(selector.to_string())
        }
    }
}

impl From<String> for Selector {
    fn from(selector: String) -> Self {
        if selector == WILDCARD {
            Selector::Any
        } else {
            Selector::Exact(selector)
        }
    }
}

impl From<Regex> for Selector {
    fn from(regex: Regex) -> Self {
        Selector::Pattern(regex)
    }
}

impl From<&Regex> for Selector {
    fn from(regex: &Regex) -> Self {
        Selector::Pattern(regex.clone())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Any => f.write_str(WILDCARD),
            Selector::Exact(s) => f.write_str(s),
            Selector::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
