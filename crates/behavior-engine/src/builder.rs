//! Builder utilities for ergonomic behavior construction.
//!
//! These helpers keep trees readable: `sequence(vec![wait(&ready), succeed()])`
//! instead of spelling out `Behavior::Sequence(Rc::from(...))`.

use std::rc::Rc;

use reactive::Event;

use crate::{Behavior, Strategy};

/// Creates a node that succeeds immediately.
#[inline]
pub fn succeed() -> Behavior {
    Behavior::Succeed
}

/// Creates a node that fails immediately.
#[inline]
pub fn fail() -> Behavior {
    Behavior::Fail
}

/// Creates a step that succeeds iff `f` returns `true`.
#[inline]
pub fn do_step(f: impl Fn() -> bool + 'static) -> Behavior {
    Behavior::Do(Rc::new(f))
}

/// Creates a step that runs `f` for its effect and always succeeds.
#[inline]
pub fn do_succeed(f: impl Fn() + 'static) -> Behavior {
    Behavior::DoSucceed(Rc::new(f))
}

/// Creates a check that succeeds iff `p` holds.
#[inline]
pub fn test_fun(p: impl Fn() -> bool + 'static) -> Behavior {
    Behavior::TestFun(Rc::new(p))
}

/// Creates a node that waits for `event` to fire.
#[inline]
pub fn wait(event: &Event) -> Behavior {
    Behavior::Wait(event.clone())
}

/// Creates a sequence node. Empty sequences succeed.
#[inline]
pub fn sequence(steps: Vec<Behavior>) -> Behavior {
    Behavior::Sequence(steps.into())
}

/// Creates a selector node. Empty selectors fail.
#[inline]
pub fn selector(steps: Vec<Behavior>) -> Behavior {
    Behavior::Selector(steps.into())
}

/// Creates a parallel node with the given strategy.
#[inline]
pub fn parallel(strategy: Strategy, branches: Vec<Behavior>) -> Behavior {
    Behavior::Parallel(strategy, branches.into())
}

/// Shorthand for `parallel(Strategy::Forall, branches)`.
#[inline]
pub fn forall(branches: Vec<Behavior>) -> Behavior {
    parallel(Strategy::Forall, branches)
}

/// Shorthand for `parallel(Strategy::Exists, branches)`.
#[inline]
pub fn exists(branches: Vec<Behavior>) -> Behavior {
    parallel(Strategy::Exists, branches)
}

/// Creates an inverter node.
#[inline]
pub fn invert(child: Behavior) -> Behavior {
    Behavior::Invert(Rc::new(child))
}

/// Creates an always-succeed node.
#[inline]
pub fn always_succeed(child: Behavior) -> Behavior {
    Behavior::AlwaysSucceed(Rc::new(child))
}
