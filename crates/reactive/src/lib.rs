//! Minimal push-based reactive primitives.
//!
//! This crate provides the two primitives the behavior engine runs against:
//!
//! - **Single-threaded**: handles are `Rc`-based and cheap to clone
//! - **Push-driven**: firing an event or setting a signal synchronously
//!   invokes subscribers before returning
//! - **Re-entrant**: callbacks run outside every internal borrow, so they may
//!   subscribe, cancel, fire or set freely
//!
//! # Architecture
//!
//! - [`Event`]: fires once, then is permanently spent
//! - [`Signal`]: holds a current value and notifies on every change
//! - [`Subscription`]: explicit handle used to detach a callback

pub mod error;
pub mod event;
pub mod signal;
pub mod subscription;

pub use error::ReactiveError;
pub use event::Event;
pub use signal::Signal;
pub use subscription::Subscription;
