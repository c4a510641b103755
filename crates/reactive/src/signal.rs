//! Time-varying observable value.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::subscription::{Detach, Subscription};

type Observer<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct SignalInner<T> {
    value: T,
    next_id: u64,
    subscribers: BTreeMap<u64, Observer<T>>,
}

impl<T> Detach for RefCell<SignalInner<T>> {
    fn detach(&self, id: u64) -> bool {
        let removed = self.borrow_mut().subscribers.remove(&id);
        removed.is_some()
    }

    fn is_attached(&self, id: u64) -> bool {
        self.borrow().subscribers.contains_key(&id)
    }
}

/// A value that changes over time and notifies subscribers on every change.
///
/// Subscribers are called in subscription order with the new value. They run
/// after the value is stored and outside any internal borrow, so they may read
/// the signal or subscribe to it. A subscriber is never re-entered: if it sets
/// the signal from inside its own callback, it is skipped for that nested
/// change.
pub struct Signal<T> {
    inner: Rc<RefCell<SignalInner<T>>>,
}

impl<T: Clone + 'static> Signal<T> {
    /// Creates a signal holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalInner {
                value,
                next_id: 0,
                subscribers: BTreeMap::new(),
            })),
        }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Reads the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replaces the value and notifies every subscriber.
    pub fn set(&self, value: T) {
        self.inner.borrow_mut().value = value;
        self.notify();
    }

    /// Mutates the value in place and notifies every subscriber.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.inner.borrow_mut().value);
        self.notify();
    }

    /// Registers a callback invoked with the new value on every change.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            let observer: Observer<T> = Rc::new(RefCell::new(callback));
            inner.subscribers.insert(id, observer);
            id
        };

        let source: Weak<dyn Detach> = Rc::downgrade(&self.inner) as Weak<dyn Detach>;
        Subscription::new(source, id)
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self) {
        let (value, observers) = {
            let inner = self.inner.borrow();
            let observers: Vec<(u64, Observer<T>)> = inner
                .subscribers
                .iter()
                .map(|(id, observer)| (*id, Rc::clone(observer)))
                .collect();
            (inner.value.clone(), observers)
        };

        for (id, observer) in observers {
            // Cancelled by an earlier subscriber during this notification.
            if !self.inner.is_attached(id) {
                continue;
            }
            if let Ok(mut callback) = observer.try_borrow_mut() {
                (&mut *callback)(&value);
            }
        }
    }
}

impl<T: Clone + PartialEq + 'static> Signal<T> {
    /// Stores `value` and notifies only if it differs from the current value.
    ///
    /// Returns `true` if the value changed.
    pub fn set_if_changed(&self, value: T) -> bool {
        if self.with(|current| *current == value) {
            return false;
        }
        self.set(value);
        true
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Default + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Signal")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}
