//! Decorator rules.
//!
//! Decorators wrap a single child and rewrite its result. This module provides
//! [`Decorator::Invert`] (NOT logic) and [`Decorator::AlwaysSucceed`] (error suppression).

use crate::Status;
use crate::composite::Next;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decorator {
    /// Success becomes Failure and vice versa.
    Invert,
    /// Any result becomes Success. The child still runs to completion.
    AlwaysSucceed,
}

impl Decorator {
    pub(crate) fn start(self) -> Next {
        Next::Enter(0)
    }

    pub(crate) fn on_child(self, status: Status) -> Next {
        match self {
            Decorator::Invert => Next::Settle(status.invert()),
            Decorator::AlwaysSucceed => Next::Settle(Status::Success),
        }
    }
}
