//! Document-level pointer-down listeners.
//!
//! A [`Document`] is the host's event source for "somewhere on screen was
//! pressed". Components subscribe on mount and hold the returned
//! [`Subscription`]; dropping it removes the listener. Listeners are keyed
//! by [`InstanceId`] and invoked in subscription order.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::event::PointerEvent;

type Listener = Rc<RefCell<dyn FnMut(&PointerEvent)>>;

/// Identity of a mounted component within one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<InstanceId, Listener>,
}

/// Pointer-down event source shared by every component mounted on it.
///
/// Cloning is cheap and yields a handle to the same registry.
#[derive(Clone, Default)]
pub struct Document {
    registry: Rc<RefCell<Registry>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pointer-down listener for a new instance
    pub fn subscribe(&self, listener: impl FnMut(&PointerEvent) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = InstanceId(registry.next_id);
        registry.next_id += 1;
        registry
            .listeners
            .insert(id, Rc::new(RefCell::new(listener)));
        tracing::trace!("Subscribed listener {} ({} active)", id, registry.listeners.len());

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver a pointer-down to every active listener.
    ///
    /// Listeners may subscribe or unsubscribe while this runs. One that is
    /// removed before its turn is skipped, and one that is already running
    /// (a nested dispatch from inside its own callback) is not re-entered.
    pub fn dispatch_pointer_down(&self, event: &PointerEvent) {
        let snapshot: Vec<(InstanceId, Listener)> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        tracing::trace!(
            "Dispatching pointer-down at ({}, {}) to {} listener(s)",
            event.position.x,
            event.position.y,
            snapshot.len()
        );

        for (id, listener) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(event),
                Err(_) => tracing::trace!("Listener {} is busy, skipping nested dispatch", id),
            }
        }
    }

    pub fn is_subscribed(&self, id: InstanceId) -> bool {
        self.registry.borrow().listeners.contains_key(&id)
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Guard for one registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately removes its listener"]
#[derive(Debug)]
pub struct Subscription {
    id: InstanceId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> InstanceId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // Document already gone: nothing left to unregister from
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // Removing the Rc outside the borrow lets a listener's captured state
        // drop without holding the registry.
        let removed = registry.borrow_mut().listeners.remove(&self.id);
        if removed.is_some() {
            tracing::trace!("Unsubscribed listener {}", self.id);
        }
        drop(removed);
    }
}
