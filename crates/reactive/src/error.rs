//! Errors raised by the reactive primitives.

/// Misuse of a reactive primitive.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReactiveError {
    /// The event was already fired; an event instance fires at most once.
    #[error("event has already fired")]
    AlreadyFired,
}
