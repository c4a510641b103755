//! Execution engine.
//!
//! [`Engine::run`] never blocks. It evaluates the tree synchronously as far as
//! it goes and hands back a [`Future`]:
//!
//! - Trees with no unfired `Wait` on their path resolve before `run` returns
//! - Otherwise the run suspends; firing the awaited events re-enters it and
//!   drains every node that becomes resolvable before `fire` returns
//!
//! # Node rules
//!
//! - `Succeed` / `Fail`: terminal at once
//! - `Do` / `TestFun`: the function runs exactly once, when the node is reached
//! - `DoSucceed`: the function runs once, then the node succeeds
//! - `Wait`: succeeds at once if the event already fired, else when it fires
//! - `Sequence` / `Selector`: one step at a time, left to right; stop at the
//!   first failure (sequence) or first success (selector)
//! - `Parallel`: every branch starts, in order; `Forall` settles on the first
//!   failure, `Exists` on the first success
//!
//! Once a composite is terminal its pending subtree is abandoned: waits are
//! unsubscribed and no further steps are entered. Branches of a terminal
//! parallel still start, but their results go nowhere and any wait they
//! reach is released without subscribing.

mod frame;
mod instance;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Behavior, EngineConfig, Future};

use instance::RunInstance;

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

/// Starts runs of behavior trees.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Starts one independent run of `behavior`.
    ///
    /// Step functions reached synchronously run before this returns. A panic
    /// in a step function is not caught and unwinds to the caller.
    pub fn run(&self, behavior: &Behavior) -> Future {
        let run_id = NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed);
        let outcome = Future::pending();

        let instance = RunInstance::new(run_id, &self.config, outcome.clone());
        instance.start(behavior.clone());

        outcome
    }
}

/// Runs `behavior` with the default engine configuration.
pub fn run(behavior: &Behavior) -> Future {
    Engine::default().run(behavior)
}
