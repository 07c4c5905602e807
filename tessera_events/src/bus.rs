// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry and dispatch.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::Priority;

/// An event that can be routed through an [`EventBus`].
pub trait BusEvent {
    /// Tag identifying which listener list an event is dispatched to.
    type Kind: Copy + Eq + Hash + fmt::Debug;

    /// Returns the tag of this event.
    fn kind(&self) -> Self::Kind;
}

/// An event whose pending state change can be vetoed by a listener.
pub trait Cancelable {
    /// Marks the event as canceled.
    fn cancel(&mut self);

    /// Returns `true` once any listener has canceled the event.
    fn is_canceled(&self) -> bool;
}

/// Handle returned on registration, used to remove a listener later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type ListenerFn<E, C> = dyn Fn(&mut E, &mut C);

struct Entry<E, C> {
    id: ListenerId,
    priority: Priority,
    listener: Rc<ListenerFn<E, C>>,
}

/// Per-kind registry of priority-ordered listeners.
///
/// Listeners are `Fn` closures shared behind `Rc`, so a dispatch can hold its
/// own handles while a listener re-enters the code that owns the bus. Use
/// interior mutability (`Cell`, `RefCell`) for listener-local state.
pub struct EventBus<E: BusEvent, C> {
    by_kind: HashMap<E::Kind, Vec<Entry<E, C>>>,
    any: Vec<Entry<E, C>>,
    next_id: u64,
}

impl<E: BusEvent, C> Default for EventBus<E, C> {
    fn default() -> Self {
        Self {
            by_kind: HashMap::new(),
            any: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E: BusEvent, C> fmt::Debug for EventBus<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_kind: usize = self.by_kind.values().map(Vec::len).sum();
        f.debug_struct("EventBus")
            .field("kinds", &self.by_kind.len())
            .field("listeners", &per_kind)
            .field("any_listeners", &self.any.len())
            .finish_non_exhaustive()
    }
}

impl<E: BusEvent, C> EventBus<E, C> {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for events of `kind`.
    ///
    /// The listener is inserted immediately before the first existing listener
    /// with a strictly greater priority, or appended if there is none.
    pub fn register<F>(&mut self, kind: E::Kind, priority: Priority, listener: F) -> ListenerId
    where
        F: Fn(&mut E, &mut C) + 'static,
    {
        let entry = self.entry(priority, Rc::new(listener));
        let id = entry.id;
        insert_ordered(self.by_kind.entry(kind).or_default(), entry);
        id
    }

    /// Registers `listener` for events of every kind.
    ///
    /// These listeners run before the kind-specific list of each dispatch,
    /// ordered among themselves by priority.
    pub fn register_all<F>(&mut self, priority: Priority, listener: F) -> ListenerId
    where
        F: Fn(&mut E, &mut C) + 'static,
    {
        let entry = self.entry(priority, Rc::new(listener));
        let id = entry.id;
        insert_ordered(&mut self.any, entry);
        id
    }

    /// Removes a listener. Returns `false` if the id is unknown.
    ///
    /// A dispatch that is already running keeps invoking the listener it
    /// captured; the removal applies from the next dispatch on.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        if remove_id(&mut self.any, id) {
            return true;
        }
        self.by_kind
            .values_mut()
            .any(|listeners| remove_id(listeners, id))
    }

    /// Number of listeners registered for `kind`, excluding listeners
    /// registered for every kind.
    #[must_use]
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Returns `true` if no listener is registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.any.is_empty() && self.by_kind.values().all(Vec::is_empty)
    }

    /// Captures the ordered listeners that a dispatch of `kind` would invoke.
    ///
    /// The snapshot does not borrow the bus, which lets the owner of the bus
    /// pass itself as the dispatch context.
    #[must_use]
    pub fn snapshot(&self, kind: E::Kind) -> Snapshot<E, C> {
        let specific = self.by_kind.get(&kind).map_or(&[][..], Vec::as_slice);
        let listeners = self
            .any
            .iter()
            .chain(specific)
            .map(|entry| Rc::clone(&entry.listener))
            .collect();
        Snapshot { listeners }
    }

    /// Dispatches `event` to its listeners and returns how many were invoked.
    pub fn dispatch(&self, event: &mut E, ctx: &mut C) -> usize {
        self.snapshot(event.kind()).dispatch(event, ctx)
    }

    fn entry(&mut self, priority: Priority, listener: Rc<ListenerFn<E, C>>) -> Entry<E, C> {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        Entry {
            id,
            priority,
            listener,
        }
    }
}

fn insert_ordered<E, C>(listeners: &mut Vec<Entry<E, C>>, entry: Entry<E, C>) {
    match listeners.iter().position(|l| l.priority > entry.priority) {
        Some(index) => listeners.insert(index, entry),
        None => listeners.push(entry),
    }
}

fn remove_id<E, C>(listeners: &mut Vec<Entry<E, C>>, id: ListenerId) -> bool {
    match listeners.iter().position(|l| l.id == id) {
        Some(index) => {
            listeners.remove(index);
            true
        }
        None => false,
    }
}

/// Ordered listener handles captured by [`EventBus::snapshot`].
pub struct Snapshot<E, C> {
    listeners: SmallVec<[Rc<ListenerFn<E, C>>; 8]>,
}

impl<E, C> fmt::Debug for Snapshot<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E, C> Snapshot<E, C> {
    /// Number of captured listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invokes every captured listener in order with the same event.
    ///
    /// Listeners keep running after one of them cancels the event.
    /// Returns the number of listeners invoked.
    pub fn dispatch(self, event: &mut E, ctx: &mut C) -> usize {
        for listener in &self.listeners {
            (**listener)(event, ctx);
        }
        self.listeners.len()
    }
}
