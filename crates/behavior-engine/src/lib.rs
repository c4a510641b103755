//! Composable behaviors executed against single-fire events.
//!
//! A [`Behavior`] is a small declarative program: immediate leaves, step
//! functions, waits on [`reactive::Event`]s, ordered sequences and quantified
//! parallel compositions. [`Engine::run`] executes it and returns a [`Future`]
//! that resolves exactly once.
//!
//! - **Synchronous first**: everything that can resolve now resolves inside `run`
//! - **Push-driven**: suspended runs continue inside the `fire` call that wakes them
//! - **Immutable trees**: per-run state lives in the engine, so one tree can be
//!   run many times, concurrently
//! - **Monotonic outcome**: `Pending` changes once, to `Succeeded` or `Failed`
//!
//! # Architecture
//!
//! - [`Behavior`]: tagged tree of node kinds; build it with [`builder`] helpers
//! - [`Engine`]: starts runs; [`run`] uses the default [`EngineConfig`]
//! - [`Future`]: single-assignment [`Outcome`] cell
//! - [`Status`]: terminal Success or Failure
//!
//! # Example
//!
//! ```rust
//! use behavior_engine::builder::*;
//! use behavior_engine::{Outcome, run};
//! use reactive::Event;
//!
//! let door_open = Event::new();
//! let tree = sequence(vec![wait(&door_open), do_succeed(|| println!("entering"))]);
//!
//! let future = run(&tree);
//! assert_eq!(future.current_value(), Outcome::Pending);
//!
//! door_open.fire().unwrap();
//! assert_eq!(future.current_value(), Outcome::Succeeded);
//! ```

pub mod behavior;
pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod future;
pub mod status;

mod composite;
mod decorator;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, EffectFn, StepFn, Strategy};
pub use config::EngineConfig;
pub use engine::{Engine, run};
pub use error::{EngineError, Result};
pub use future::Future;
pub use status::{Outcome, Status};
