// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Events: a priority-ordered, cancelable event bus.
//!
//! ## Overview
//!
//! An [`EventBus`] maps an event-kind tag to an ordered list of listeners.
//! Dispatching an event invokes every listener registered for its kind,
//! synchronously and in order, passing the same event instance to each.
//!
//! The bus owns no domain state. It never reads or writes anything beyond the
//! event value it is handed and the context reference it forwards.
//!
//! ## Ordering
//!
//! Listeners carry a [`Priority`] (`Low < Normal < High < Monitor`).
//! Iteration order is ascending priority, so `Monitor` listeners run last and
//! see the final state of the event. Equal priorities keep registration order.
//!
//! Listeners registered with [`EventBus::register_all`] observe every kind and
//! run before the kind-specific list.
//!
//! ## Cancellation
//!
//! Events that can be vetoed implement [`Cancelable`]. Cancelling does not stop
//! dispatch: later listeners still run and may observe the flag. It is up to
//! the dispatching code to check [`Cancelable::is_canceled`] afterwards and
//! discard the pending change.
//!
//! ## Re-entrancy
//!
//! Listeners receive a `&mut C` context alongside the event. When the context
//! is the very object that owns the bus, take a [`Snapshot`] first: it clones
//! the (reference-counted) listener handles so the bus is no longer borrowed
//! while listeners run, and listeners may call back into the owner, including
//! dispatching nested events.
//!
//! ## Minimal example
//!
//! ```
//! use tessera_events::{BusEvent, EventBus, Priority};
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
//! enum Kind { Ping }
//!
//! struct Ping;
//! impl BusEvent for Ping {
//!     type Kind = Kind;
//!     fn kind(&self) -> Kind { Kind::Ping }
//! }
//!
//! let mut bus: EventBus<Ping, Vec<&'static str>> = EventBus::new();
//! bus.register(Kind::Ping, Priority::Monitor, |_, log| log.push("monitor"));
//! bus.register(Kind::Ping, Priority::Low, |_, log| log.push("low"));
//!
//! let mut log = Vec::new();
//! bus.dispatch(&mut Ping, &mut log);
//! assert_eq!(log, vec!["low", "monitor"]);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod bus;
mod priority;

pub use bus::{BusEvent, Cancelable, EventBus, ListenerId, Snapshot};
pub use priority::Priority;
