//! Subscription handles shared by events and signals.

use std::fmt;
use std::rc::Weak;

/// A source of callbacks that can detach one of them by id.
pub(crate) trait Detach {
    /// Removes the callback registered under `id`. Returns `true` if it was present.
    fn detach(&self, id: u64) -> bool;

    /// Returns `true` if a callback is still registered under `id`.
    fn is_attached(&self, id: u64) -> bool;
}

/// Handle to a registered callback.
///
/// Dropping the handle leaves the callback registered; call [`cancel`](Self::cancel)
/// to detach it. The handle only holds a weak reference, so it never keeps its
/// source alive.
pub struct Subscription {
    source: Option<Weak<dyn Detach>>,
    id: u64,
}

impl Subscription {
    pub(crate) fn new(source: Weak<dyn Detach>, id: u64) -> Self {
        Self {
            source: Some(source),
            id,
        }
    }

    /// A subscription that was never attached to anything.
    ///
    /// Returned when subscribing to an event that has already fired.
    pub fn inert() -> Self {
        Self {
            source: None,
            id: 0,
        }
    }

    /// Detaches the callback if it is still registered.
    ///
    /// Returns `true` if a callback was removed. Cancelling twice, cancelling
    /// after the callback ran, or cancelling after the source was dropped all
    /// return `false`.
    pub fn cancel(&self) -> bool {
        match self.source.as_ref().and_then(Weak::upgrade) {
            Some(source) => source.detach(self.id),
            None => false,
        }
    }

    /// Returns `true` while the callback is registered and has not run.
    pub fn is_active(&self) -> bool {
        self.source
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|source| source.is_attached(self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
