#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use behavior_engine::Behavior;
use behavior_engine::builder::{do_succeed, test_fun};

/// Routes engine logs to the test harness; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Shared log that steps prepend to, so it reads most-recent-first.
#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<i32>>>);

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    /// A step that prepends `value`.
    pub fn push(&self, value: i32) -> Behavior {
        let entries = Rc::clone(&self.0);
        do_succeed(move || entries.borrow_mut().insert(0, value))
    }

    /// A check that succeeds iff the log currently equals `expected`.
    pub fn equals(&self, expected: Vec<i32>) -> Behavior {
        let entries = Rc::clone(&self.0);
        test_fun(move || *entries.borrow() == expected)
    }

    pub fn entries(&self) -> Vec<i32> {
        self.0.borrow().clone()
    }
}
