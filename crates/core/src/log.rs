// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only event log

use crate::event::Event;
use crate::selector::Selector;
use std::rc::Rc;

/// Ordered record of every dispatched event
///
/// Events are shared as `Rc<Event>` so readers and listeners can hold on to
/// them without copying; nothing hands out a mutable reference once an
/// event has been appended.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Rc<Event>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event at the tail
    pub fn append(&mut self, event: Rc<Event>) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rc<Event>> {
        self.events.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Event>> {
        self.events.iter()
    }

    /// Copy of the log as it stands now
    pub fn snapshot(&self) -> Vec<Rc<Event>> {
        self.events.clone()
    }

    /// Events whose type matches the selector, in log order
    pub fn query(&self, selector: &Selector) -> Vec<Rc<Event>> {
        self.events
            .iter()
            .filter(|e| selector.matches(e.event_type()))
            .cloned()
            .collect()
    }

    /// Events recorded after the first `index` entries
    pub fn after(&self, index: usize) -> Vec<Rc<Event>> {
        self.events.iter().skip(index).cloned().collect()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
