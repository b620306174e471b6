// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener registry with lazy removal
//!
//! Disposing a listener only flips its flag. The registry drops disposed
//! listeners in [`ListenerRegistry::sweep_disposed`], which the dispatch
//! engine runs once per completed drain so a pass over the listeners never
//! sees the list change under it.

use crate::error::ListenerError;
use crate::event::Event;
use crate::selector::Selector;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// What a listener callback may return
///
/// Plain `()` callbacks never fail. `Result` callbacks fail with any error
/// convertible into [`ListenerError`].
pub trait ListenerOutcome {
    fn into_result(self) -> Result<(), ListenerError>;
}

impl ListenerOutcome for () {
    fn into_result(self) -> Result<(), ListenerError> {
        Ok(())
    }
}

impl<E: Into<ListenerError>> ListenerOutcome for Result<(), E> {
    fn into_result(self) -> Result<(), ListenerError> {
        self.map_err(Into::into)
    }
}

pub(crate) type Callback<C> = Box<dyn Fn(&C, &Event) -> Result<(), ListenerError>>;

/// Erase a user callback into the registry's callback type
pub(crate) fn callback<C, F, R>(f: F) -> Callback<C>
where
    F: Fn(&C, &Event) -> R + 'static,
    R: ListenerOutcome,
{
    Box::new(move |context, event| f(context, event).into_result())
}

/// A registered interest in events
pub struct Listener<C> {
    selector: Selector,
    callback: Callback<C>,
    context: Rc<C>,
    disposed: Cell<bool>,
}

impl<C> Listener<C> {
    pub(crate) fn new(selector: Selector, callback: Callback<C>, context: Rc<C>) -> Self {
        Self {
            selector,
            callback,
            context,
            disposed: Cell::new(false),
        }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Receiver the callback runs against
    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Mark disposed; returns false if it already was
    pub(crate) fn dispose(&self) -> bool {
        !self.disposed.replace(true)
    }

    /// Live and interested in this event type
    pub(crate) fn wants(&self, event_type: &str) -> bool {
        !self.is_disposed() && self.selector.matches(event_type)
    }

    pub(crate) fn call(&self, event: &Event) -> Result<(), ListenerError> {
        (self.callback)(&self.context, event)
    }
}

impl<C> fmt::Debug for Listener<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("selector", &self.selector)
            .field("disposed", &self.disposed.get())
            .finish_non_exhaustive()
    }
}

/// Listeners in registration order, including disposed ones awaiting sweep
pub(crate) struct ListenerRegistry<C> {
    listeners: Vec<Rc<Listener<C>>>,
}

impl<C> ListenerRegistry<C> {
    pub(crate) fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, listener: Rc<Listener<C>>) {
        self.listeners.push(listener);
    }

    /// Drop disposed listeners; returns how many were removed
    pub(crate) fn sweep_disposed(&mut self) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|l| !l.is_disposed());
        before - self.listeners.len()
    }

    /// Every listener still held, disposed or not
    pub(crate) fn snapshot(&self) -> Vec<Rc<Listener<C>>> {
        self.listeners.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Visit listeners in registration order, skipping disposed ones
    ///
    /// The list is snapshotted before the first call, so `f` may add or
    /// dispose listeners: additions are not visited and disposals are
    /// honored for listeners not yet reached.
    pub(crate) fn for_each_active(registry: &RefCell<Self>, mut f: impl FnMut(&Rc<Listener<C>>)) {
        let snapshot = registry.borrow().snapshot();
        for listener in &snapshot {
            if listener.is_disposed() {
                continue;
            }
            f(listener);
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
