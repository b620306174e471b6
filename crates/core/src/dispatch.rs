// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch engine
//!
//! Every emitted event goes through one FIFO queue. Whoever finds the engine
//! idle drains it; an `emit` made while listeners are running only enqueues,
//! and the drain already in progress picks the event up after the current
//! event's listener pass finishes. The drain is a loop, so long chains of
//! listener-triggered events never deepen the stack.

use crate::diagnostics::{Diagnostics, LISTENER_FAILED, REPLAY_FAILED};
use crate::event::{Event, Payload};
use crate::log::EventLog;
use crate::profile::Stamper;
use crate::registry::{Listener, ListenerRegistry};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use tracing::debug;

/// Whether the engine is currently running listener callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Dispatching,
}

pub(crate) struct Engine<C> {
    pub(crate) log: RefCell<EventLog>,
    pub(crate) registry: RefCell<ListenerRegistry<C>>,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) stamper: Stamper,
    pub(crate) default_context: Rc<C>,
    queue: RefCell<VecDeque<Event>>,
    /// Callback passes in progress (dispatch or replay), nesting included
    holds: Cell<usize>,
}

/// Marks a callback pass in progress for as long as it lives
struct Hold<'a>(&'a Cell<usize>);

impl<'a> Hold<'a> {
    fn new(holds: &'a Cell<usize>) -> Self {
        holds.set(holds.get() + 1);
        Self(holds)
    }
}

impl Drop for Hold<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

impl<C> Engine<C> {
    pub(crate) fn new(diagnostics: Diagnostics, stamper: Stamper, default_context: Rc<C>) -> Self {
        Self {
            log: RefCell::new(EventLog::new()),
            registry: RefCell::new(ListenerRegistry::new()),
            diagnostics,
            stamper,
            default_context,
            queue: RefCell::new(VecDeque::new()),
            holds: Cell::new(0),
        }
    }

    pub(crate) fn state(&self) -> DispatchState {
        if self.holds.get() > 0 {
            DispatchState::Dispatching
        } else {
            DispatchState::Idle
        }
    }

    /// Build, stamp and queue an event, then drain if nobody else is
    pub(crate) fn emit(&self, event_type: String, payload: Payload) {
        self.diagnostics
            .info(|| format!("{} event emitted", event_type));

        let mut event = Event::from_payload(event_type, payload);
        self.stamper.stamp(&mut event.meta);

        debug!(event_type = event.event_type(), state = ?self.state(), "emit");
        self.queue.borrow_mut().push_back(event);
        self.drain();
    }

    pub(crate) fn add(&self, listener: Rc<Listener<C>>) {
        debug!(selector = %listener.selector(), "listener added");
        self.registry.borrow_mut().add(listener);
    }

    /// Deliver the current log to one listener, in log order
    ///
    /// The log is snapshotted first; events emitted by the replayed
    /// callbacks are queued and dispatched normally once the replay ends.
    pub(crate) fn replay(&self, listener: &Listener<C>) {
        self.diagnostics.info(|| "Replaying events".to_string());

        self.held(|| {
            let snapshot = self.log.borrow().snapshot();
            for event in &snapshot {
                if listener.is_disposed() {
                    break;
                }
                if !listener.selector().matches(event.event_type()) {
                    continue;
                }
                if let Err(detail) = invoke(listener, event) {
                    self.diagnostics.error(REPLAY_FAILED, &detail);
                }
            }
        });
    }

    /// Run `f` as a callback pass, then drain whatever it queued
    fn held(&self, f: impl FnOnce()) {
        {
            let _hold = Hold::new(&self.holds);
            f();
        }
        self.drain();
    }

    fn drain(&self) {
        if self.holds.get() > 0 {
            if !self.queue.borrow().is_empty() {
                self.diagnostics
                    .info(|| "Event will be processed later".to_string());
            }
            return;
        }

        loop {
            // The queue borrow must end before listeners run: they may emit
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };

            let event = Rc::new(event);
            self.log.borrow_mut().append(Rc::clone(&event));

            let _hold = Hold::new(&self.holds);
            self.deliver(&event);
        }

        self.diagnostics
            .info(|| "No more events to process".to_string());

        let swept = self.registry.borrow_mut().sweep_disposed();
        if swept > 0 {
            debug!(swept, "swept disposed listeners");
        }
    }

    fn deliver(&self, event: &Event) {
        ListenerRegistry::for_each_active(&self.registry, |listener| {
            if !listener.selector().matches(event.event_type()) {
                return;
            }
            if let Err(detail) = invoke(listener, event) {
                self.diagnostics.error(LISTENER_FAILED, &detail);
            }
        });
    }
}

/// Call a listener, turning an error or a panic into its message
fn invoke<C>(listener: &Listener<C>, event: &Event) -> Result<(), String> {
    match panic::catch_unwind(AssertUnwindSafe(|| listener.call(event))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("listener panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("listener panicked: {}", s)
    } else {
        "listener panicked".to_string()
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
