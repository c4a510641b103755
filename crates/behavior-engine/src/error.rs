//! Error types for the behavior engine.
//!
//! A failed behavior is a [`Status::Failure`](crate::Status::Failure), not an
//! error. Errors only describe misuse of a handle.

use reactive::ReactiveError;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The run has not produced a terminal outcome yet.
    #[error("behavior outcome is still pending")]
    Pending,

    #[error(transparent)]
    Reactive(#[from] ReactiveError),
}
