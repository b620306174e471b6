// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscription handles returned by `on` and `once`

use crate::dispatch::Engine;
use crate::registry::Listener;
use crate::selector::Selector;
use std::fmt;
use std::rc::{Rc, Weak};

/// Handle for one listener: stop it, or catch it up on past events
///
/// Clones refer to the same listener. The handle does not keep the bus
/// alive; once every `Bus` handle is dropped, `replay` does nothing.
pub struct Subscription<C> {
    listener: Rc<Listener<C>>,
    engine: Weak<Engine<C>>,
}

impl<C> Subscription<C> {
    pub(crate) fn new(listener: Rc<Listener<C>>, engine: Weak<Engine<C>>) -> Self {
        Self { listener, engine }
    }

    /// Stop delivering events to this listener
    ///
    /// Safe to call any number of times. The listener leaves
    /// `Bus::listeners` after the next completed dispatch.
    pub fn dispose(&self) -> &Self {
        if let Some(engine) = self.engine.upgrade() {
            engine
                .diagnostics
                .info(|| "Disposing event handler".to_string());
        }
        self.listener.dispose();
        self
    }

    /// Deliver every already-logged event this listener matches
    ///
    /// Runs synchronously in log order against the listener's context and
    /// stops early if the listener gets disposed. A disposed subscription
    /// replays nothing.
    pub fn replay(&self) -> &Self {
        if self.listener.is_disposed() {
            return self;
        }
        if let Some(engine) = self.engine.upgrade() {
            engine.replay(&self.listener);
        }
        self
    }

    pub fn is_disposed(&self) -> bool {
        self.listener.is_disposed()
    }

    pub fn selector(&self) -> &Selector {
        self.listener.selector()
    }

    pub fn listener(&self) -> &Rc<Listener<C>> {
        &self.listener
    }
}

impl<C> Clone for Subscription<C> {
    fn clone(&self) -> Self {
        Self {
            listener: Rc::clone(&self.listener),
            engine: Weak::clone(&self.engine),
        }
    }
}

impl<C> fmt::Debug for Subscription<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("listener", &self.listener)
            .finish()
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
