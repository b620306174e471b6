// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event identity and timing profile
//!
//! A bus can stamp every emitted event with a unique `meta.cid` and a
//! millisecond `meta.cts`. Both are off unless the profile asks for them.
//! The id source and the clock are injectable so tests stay deterministic.

use crate::event::Meta;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// Which stamps `emit` adds to `meta`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    /// Stamp `meta.cid`
    pub identity: bool,
    /// Stamp `meta.cts`
    pub timing: bool,
}

impl Profile {
    /// Stamp both identity and timing
    pub fn tracked() -> Self {
        Self {
            identity: true,
            timing: true,
        }
    }
}

/// Source of event ids
pub trait IdGen {
    fn next_id(&self) -> String;
}

/// Random UUID v4 ids
#[derive(Clone, Debug, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Predictable `prefix-N` ids for tests
#[derive(Clone, Debug)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Rc<Cell<u64>>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Rc::new(Cell::new(0)),
        }
    }
}

impl IdGen for SequentialIdGen {
    fn next_id(&self) -> String {
        let n = self.counter.get() + 1;
        self.counter.set(n);
        format!("{}-{}", self.prefix, n)
    }
}

/// Wall clock in milliseconds since the Unix epoch
pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to
#[derive(Clone, Debug)]
pub struct FakeClock {
    current: Rc<Cell<i64>>,
}

impl FakeClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            current: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: i64) {
        self.current.set(self.current.get() + ms);
    }

    pub fn set(&self, ms: i64) {
        self.current.set(ms);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> i64 {
        self.current.get()
    }
}

/// Applies a profile to freshly built events
pub(crate) struct Stamper {
    profile: Profile,
    ids: Rc<dyn IdGen>,
    clock: Rc<dyn Clock>,
}

impl Stamper {
    pub(crate) fn new(profile: Profile) -> Self {
        Self {
            profile,
            ids: Rc::new(UuidIdGen),
            clock: Rc::new(SystemClock),
        }
    }

    pub(crate) fn profile(&self) -> Profile {
        self.profile
    }

    pub(crate) fn with_id_gen(mut self, ids: Rc<dyn IdGen>) -> Self {
        self.ids = ids;
        self
    }

    pub(crate) fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Fill in missing stamps; values the caller supplied are kept
    pub(crate) fn stamp(&self, meta: &mut Meta) {
        if self.profile.identity && meta.cid.is_none() {
            meta.cid = Some(self.ids.next_id());
        }
        if self.profile.timing && meta.cts.is_none() {
            meta.cts = Some(self.clock.now_ms());
        }
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
