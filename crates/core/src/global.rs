// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Well-known bus slot
//!
//! Code that cannot be handed a [`Bus`] can reach one installed here. The
//! slot is per thread, matching the bus itself. Nothing in the crate reads
//! it; buses built with [`Bus::new`] stay independent.

use crate::bus::Bus;
use std::cell::RefCell;

thread_local! {
    static GLOBAL_BUS: RefCell<Option<Bus>> = const { RefCell::new(None) };
}

/// Install `bus` as this thread's global bus, returning the previous one
pub fn install(bus: Bus) -> Option<Bus> {
    GLOBAL_BUS.with(|slot| slot.borrow_mut().replace(bus))
}

/// Remove and return this thread's global bus
pub fn uninstall() -> Option<Bus> {
    GLOBAL_BUS.with(|slot| slot.borrow_mut().take())
}

/// Handle to this thread's global bus, if one is installed
pub fn get() -> Option<Bus> {
    GLOBAL_BUS.with(|slot| slot.borrow().clone())
}

/// Run `f` against the global bus, installing a fresh one if needed
///
/// The slot is not borrowed while `f` runs, so `f` may emit, listen, or
/// even replace the global bus.
pub fn with<R>(f: impl FnOnce(&Bus) -> R) -> R {
    let bus = match get() {
        Some(bus) => bus,
        None => {
            let bus = Bus::new();
            install(bus.clone());
            bus
        }
    };
    f(&bus)
}

#[cfg(test)]
#[path = "global_tests.rs"]
mod tests;
