// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The bus: emit events, listen for them, read the log

use crate::config::BusConfig;
use crate::diagnostics::{DiagnosticSink, Diagnostics, LogLevel, TracingSink};
use crate::dispatch::{DispatchState, Engine};
use crate::event::{Event, Payload};
use crate::profile::{Clock, IdGen, Profile, Stamper};
use crate::registry::{callback, Listener, ListenerOutcome};
use crate::selector::Selector;
use crate::subscription::Subscription;
use std::rc::{Rc, Weak};

/// In-process event bus
///
/// `C` is the context listeners run against when they are registered
/// without one of their own. Clones share the same log, listeners and
/// queue. The bus is single-threaded: every call runs to completion on the
/// calling thread, and listeners may call back into the bus freely.
///
/// A listener closure that captures a clone of its own bus forms an `Rc`
/// cycle, so the bus is not freed while that listener is registered.
/// Disposing the listener breaks the cycle once the next drain sweeps it.
pub struct Bus<C: 'static = ()> {
    engine: Rc<Engine<C>>,
}

impl Bus<()> {
    pub fn new() -> Self {
        BusBuilder::new().build()
    }

    pub fn builder() -> BusBuilder<()> {
        BusBuilder::new()
    }

    pub fn from_config(config: &BusConfig) -> Self {
        BusBuilder::new().config(config).build()
    }
}

impl Default for Bus<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> Bus<C> {
    /// Bus whose listeners default to `context`
    pub fn with_context(context: C) -> Self {
        BusBuilder::new().context(context).build()
    }

    /// Record an event and deliver it to every matching listener
    ///
    /// The payload is copied; `meta.type` is set to `event_type`. Called
    /// from inside a listener, the event is queued and delivered after the
    /// events already queued ahead of it.
    pub fn emit(&self, event_type: impl Into<String>, payload: impl Into<Payload>) {
        self.engine.emit(event_type.into(), payload.into());
    }

    /// Listen for events matching `selector`, using the bus context
    pub fn on<S, F, R>(&self, selector: S, callback: F) -> Subscription<C>
    where
        S: Into<Selector>,
        F: Fn(&C, &Event) -> R + 'static,
        R: ListenerOutcome,
    {
        let context = Rc::clone(&self.engine.default_context);
        self.register(selector.into(), context, crate::registry::callback(callback))
    }

    /// Listen for events matching `selector`, running against `context`
    pub fn on_with<S, F, R>(&self, selector: S, context: C, callback: F) -> Subscription<C>
    where
        S: Into<Selector>,
        F: Fn(&C, &Event) -> R + 'static,
        R: ListenerOutcome,
    {
        self.register(
            selector.into(),
            Rc::new(context),
            crate::registry::callback(callback),
        )
    }

    /// Like [`Bus::on`], but the listener disposes itself after its first call
    pub fn once<S, F, R>(&self, selector: S, callback: F) -> Subscription<C>
    where
        S: Into<Selector>,
        F: Fn(&C, &Event) -> R + 'static,
        R: ListenerOutcome,
    {
        let context = Rc::clone(&self.engine.default_context);
        self.register_once(selector.into(), context, callback)
    }

    /// Like [`Bus::on_with`], but the listener disposes itself after its first call
    pub fn once_with<S, F, R>(&self, selector: S, context: C, callback: F) -> Subscription<C>
    where
        S: Into<Selector>,
        F: Fn(&C, &Event) -> R + 'static,
        R: ListenerOutcome,
    {
        self.register_once(selector.into(), Rc::new(context), callback)
    }

    /// Apply `f` to every logged event in order, against the bus context
    pub fn map<R>(&self, f: impl FnMut(&C, &Event, usize) -> R) -> Vec<R> {
        let context = Rc::clone(&self.engine.default_context);
        self.map_with(&context, f)
    }

    /// Apply `f` to every logged event in order, against `context`
    ///
    /// Works on the log as it stood when called; events `f` emits are not
    /// visited.
    pub fn map_with<R>(&self, context: &C, mut f: impl FnMut(&C, &Event, usize) -> R) -> Vec<R> {
        let snapshot = self.engine.log.borrow().snapshot();
        snapshot
            .iter()
            .enumerate()
            .map(|(i, event)| f(context, event, i))
            .collect()
    }

    /// Recorded events in emission order
    pub fn events(&self) -> Vec<Rc<Event>> {
        self.engine.log.borrow().snapshot()
    }

    pub fn event_count(&self) -> usize {
        self.engine.log.borrow().len()
    }

    /// Recorded events whose type matches `selector`
    pub fn query(&self, selector: impl Into<Selector>) -> Vec<Rc<Event>> {
        self.engine.log.borrow().query(&selector.into())
    }

    /// Registered listeners, including disposed ones not yet swept
    pub fn listeners(&self) -> Vec<Rc<Listener<C>>> {
        self.engine.registry.borrow().snapshot()
    }

    pub fn listener_count(&self) -> usize {
        self.engine.registry.borrow().len()
    }

    pub fn log_level(&self) -> LogLevel {
        self.engine.diagnostics.level()
    }

    /// Change diagnostic verbosity; dispatch is unaffected
    pub fn set_log_level(&self, level: LogLevel) {
        self.engine.diagnostics.set_level(level);
    }

    pub fn set_sink(&self, sink: impl DiagnosticSink + 'static) {
        self.engine.diagnostics.set_sink(Rc::new(sink));
    }

    pub fn profile(&self) -> Profile {
        self.engine.stamper.profile()
    }

    pub fn state(&self) -> DispatchState {
        self.engine.state()
    }

    /// The context listeners get when registered without one
    pub fn context(&self) -> &C {
        &self.engine.default_context
    }

    fn register(
        &self,
        selector: Selector,
        context: Rc<C>,
        callback: crate::registry::Callback<C>,
    ) -> Subscription<C> {
        self.engine
            .diagnostics
            .info(|| format!("Attaching event handler for {}", selector));

        let listener = Rc::new(Listener::new(selector, callback, context));
        self.engine.add(Rc::clone(&listener));
        Subscription::new(listener, Rc::downgrade(&self.engine))
    }

    fn register_once<F, R>(&self, selector: Selector, context: Rc<C>, f: F) -> Subscription<C>
    where
        F: Fn(&C, &Event) -> R + 'static,
        R: ListenerOutcome,
    {
        self.engine
            .diagnostics
            .info(|| format!("Attaching event handler for {}", selector));

        let inner = callback(f);
        let listener = Rc::new_cyclic(|me: &Weak<Listener<C>>| {
            let me = me.clone();
            Listener::new(
                selector,
                Box::new(move |context: &C, event: &Event| {
                    let _dispose = DisposeOnDrop(me.clone());
                    inner(context, event)
                }),
                context,
            )
        });
        self.engine.add(Rc::clone(&listener));
        Subscription::new(listener, Rc::downgrade(&self.engine))
    }
}

/// Disposes a `once` listener when its call ends, including by unwinding
struct DisposeOnDrop<C>(Weak<Listener<C>>);

impl<C> Drop for DisposeOnDrop<C> {
    fn drop(&mut self) {
        if let Some(listener) = self.0.upgrade() {
            listener.dispose();
        }
    }
}

impl<C: 'static> Clone for Bus<C> {
    fn clone(&self) -> Self {
        Self {
            engine: Rc::clone(&self.engine),
        }
    }
}

/// Builder for a [`Bus`] with non-default settings
pub struct BusBuilder<C> {
    context: C,
    config: BusConfig,
    sink: Rc<dyn DiagnosticSink>,
    id_gen: Option<Rc<dyn IdGen>>,
    clock: Option<Rc<dyn Clock>>,
}

impl BusBuilder<()> {
    pub fn new() -> Self {
        Self {
            context: (),
            config: BusConfig::default(),
            sink: Rc::new(TracingSink),
            id_gen: None,
            clock: None,
        }
    }
}

impl Default for BusBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> BusBuilder<C> {
    /// Default listener context
    pub fn context<D: 'static>(self, context: D) -> BusBuilder<D> {
        BusBuilder {
            context,
            config: self.config,
            sink: self.sink,
            id_gen: self.id_gen,
            clock: self.clock,
        }
    }

    pub fn config(mut self, config: &BusConfig) -> Self {
        self.config = *config;
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.log_level = level;
        self
    }

    pub fn profile(mut self, profile: Profile) -> Self {
        self.config.profile = profile;
        self
    }

    pub fn sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Rc::new(sink);
        self
    }

    pub fn id_gen(mut self, id_gen: impl IdGen + 'static) -> Self {
        self.id_gen = Some(Rc::new(id_gen));
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Rc::new(clock));
        self
    }

    pub fn build(self) -> Bus<C> {
        let mut stamper = Stamper::new(self.config.profile);
        if let Some(id_gen) = self.id_gen {
            stamper = stamper.with_id_gen(id_gen);
        }
        if let Some(clock) = self.clock {
            stamper = stamper.with_clock(clock);
        }

        let diagnostics = Diagnostics::new(self.config.log_level, self.sink);
        Bus {
            engine: Rc::new(Engine::new(diagnostics, stamper, Rc::new(self.context))),
        }
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
