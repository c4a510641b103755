//! Single-fire event.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::ReactiveError;
use crate::subscription::{Detach, Subscription};

type Callback = Box<dyn FnOnce()>;

struct EventInner {
    fired: bool,
    next_id: u64,
    /// Keyed by subscription id, which also gives subscription order.
    subscribers: BTreeMap<u64, Callback>,
}

impl Detach for RefCell<EventInner> {
    fn detach(&self, id: u64) -> bool {
        // Bound outside the borrow so the callback is dropped after it ends.
        let removed = self.borrow_mut().subscribers.remove(&id);
        removed.is_some()
    }

    fn is_attached(&self, id: u64) -> bool {
        self.borrow().subscribers.contains_key(&id)
    }
}

/// A notification that fires at most once.
///
/// # Semantics
///
/// - [`fire`](Self::fire) invokes every current subscriber exactly once, in
///   subscription order, then the event is **spent**
/// - Subscribing to a spent event returns an inert [`Subscription`]; the
///   callback is dropped without running
/// - Subscriptions added while the event is firing are not invoked
///
/// Clones share the same instance. A fresh [`Event::new`] is always a
/// distinct event.
#[derive(Clone)]
pub struct Event {
    inner: Rc<RefCell<EventInner>>,
}

impl Event {
    /// Creates an event that has not fired yet.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(EventInner {
                fired: false,
                next_id: 0,
                subscribers: BTreeMap::new(),
            })),
        }
    }

    /// Returns `true` once [`fire`](Self::fire) has been called.
    pub fn has_fired(&self) -> bool {
        self.inner.borrow().fired
    }

    /// Number of callbacks waiting for this event.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Registers a callback to run when the event fires.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnOnce() + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        if inner.fired {
            trace!(target: "reactive::event", "subscribe on spent event ignored");
            return Subscription::inert();
        }

        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.insert(id, Box::new(callback));
        drop(inner);

        let source: Weak<dyn Detach> = Rc::downgrade(&self.inner) as Weak<dyn Detach>;
        Subscription::new(source, id)
    }

    /// Fires the event, invoking every current subscriber once.
    ///
    /// Returns the number of callbacks invoked. Callbacks cancelled by an
    /// earlier callback during the same firing are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ReactiveError::AlreadyFired`] if the event is spent.
    pub fn fire(&self) -> Result<usize, ReactiveError> {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            if inner.fired {
                return Err(ReactiveError::AlreadyFired);
            }
            inner.fired = true;
            inner.subscribers.len()
        };

        trace!(
            target: "reactive::event",
            subscribers = pending,
            "event fired"
        );

        // The event is spent, so nothing can be added while this runs; a
        // callback cancelled by an earlier one is simply no longer there.
        let mut notified = 0;
        loop {
            let next = self.inner.borrow_mut().subscribers.pop_first();
            let Some((_, callback)) = next else {
                break;
            };
            callback();
            notified += 1;
        }

        Ok(notified)
    }

    /// Returns `true` if both handles refer to the same event instance.
    pub fn ptr_eq(&self, other: &Event) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Event")
            .field("fired", &inner.fired)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}
