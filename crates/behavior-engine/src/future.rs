//! Single-assignment outcome cell handed out by [`Engine::run`](crate::Engine::run).

use std::fmt;

use reactive::{Signal, Subscription};
use tracing::trace;

use crate::{EngineError, Outcome, Result, Status};

/// Read handle on the eventual outcome of a run.
///
/// Backed by a [`Signal<Outcome>`] that only ever changes once, from
/// `Pending` to a terminal value. Clones observe the same cell.
#[derive(Clone)]
pub struct Future {
    signal: Signal<Outcome>,
}

impl Future {
    /// Creates an unresolved cell.
    pub fn pending() -> Self {
        Self {
            signal: Signal::new(Outcome::Pending),
        }
    }

    /// Creates a cell that is already terminal.
    pub fn resolved(status: Status) -> Self {
        Self {
            signal: Signal::new(status.into()),
        }
    }

    /// Current outcome; never blocks.
    pub fn current_value(&self) -> Outcome {
        self.signal.get()
    }

    /// Terminal status, or `None` while pending.
    pub fn status(&self) -> Option<Status> {
        self.current_value().status()
    }

    pub fn is_pending(&self) -> bool {
        self.current_value().is_pending()
    }

    /// Returns `Ok(true)` on success and `Ok(false)` on failure.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Pending`] while the run is unresolved.
    pub fn result(&self) -> Result<bool> {
        self.status()
            .map(Status::is_success)
            .ok_or(EngineError::Pending)
    }

    /// Sets the terminal value if the cell is still pending.
    ///
    /// Returns `true` if this call resolved the cell. Later calls are no-ops
    /// and do not notify subscribers again.
    pub fn resolve(&self, status: Status) -> bool {
        if !self.is_pending() {
            trace!(
                target: "behavior_engine::future",
                ?status,
                current = ?self.current_value(),
                "resolve ignored, already terminal"
            );
            return false;
        }
        self.signal.set(status.into());
        true
    }

    /// Calls `callback` with the terminal status exactly once.
    ///
    /// If the cell is already terminal the callback runs immediately and no
    /// subscription is returned. Otherwise it runs at resolution.
    pub fn subscribe<F>(&self, callback: F) -> Option<Subscription>
    where
        F: FnOnce(Status) + 'static,
    {
        if let Some(status) = self.status() {
            callback(status);
            return None;
        }

        let mut callback = Some(callback);
        Some(self.signal.subscribe(move |outcome: &Outcome| {
            if let Some(status) = outcome.status()
                && let Some(callback) = callback.take()
            {
                callback(status);
            }
        }))
    }
}

impl Default for Future {
    fn default() -> Self {
        Self::pending()
    }
}

impl fmt::Debug for Future {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Future").field(&self.current_value()).finish()
    }
}
