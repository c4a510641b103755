//! Declarative behavior descriptions.
//!
//! A [`Behavior`] is an immutable tree of leaves and composites. It holds no
//! execution state: the engine keeps per-run progress in its own arena, so the
//! same value can be run any number of times, including while earlier runs are
//! still pending.

use std::fmt;
use std::rc::Rc;

use reactive::Event;

use crate::Status;

/// Synchronous step reporting success or failure.
pub type StepFn = Rc<dyn Fn() -> bool>;

/// Synchronous step run for its effect only.
pub type EffectFn = Rc<dyn Fn()>;

/// How a [`Behavior::Parallel`] combines its branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Succeeds once every branch succeeded; fails at the first failure.
    Forall,
    /// Succeeds at the first success; fails once every branch failed.
    Exists,
}

impl Strategy {
    /// The branch status that settles the parallel node on its own.
    #[inline]
    pub fn decisive(self) -> Status {
        match self {
            Strategy::Forall => Status::Failure,
            Strategy::Exists => Status::Success,
        }
    }

    /// The result once every branch settled without a decisive one.
    ///
    /// This is also the result over zero branches.
    #[inline]
    pub fn exhausted(self) -> Status {
        self.decisive().invert()
    }
}

/// A task description.
///
/// Composite payloads are reference counted, so cloning a behavior is cheap
/// and never duplicates the tree.
#[derive(Clone)]
pub enum Behavior {
    /// Succeeds immediately.
    Succeed,
    /// Fails immediately.
    Fail,
    /// Runs a step once; succeeds iff it returns `true`.
    Do(StepFn),
    /// Runs a step once for its effect; always succeeds.
    DoSucceed(EffectFn),
    /// Evaluates a check once; succeeds iff it holds.
    TestFun(StepFn),
    /// Succeeds when the event fires, or immediately if it already has.
    Wait(Event),
    /// Runs steps in order, stopping at the first failure.
    Sequence(Rc<[Behavior]>),
    /// Runs steps in order, stopping at the first success.
    Selector(Rc<[Behavior]>),
    /// Runs all branches and combines them per [`Strategy`].
    Parallel(Strategy, Rc<[Behavior]>),
    /// Swaps the child's success and failure.
    Invert(Rc<Behavior>),
    /// Runs the child to completion, then succeeds regardless.
    AlwaysSucceed(Rc<Behavior>),
}

impl Behavior {
    /// Short name of the node kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Behavior::Succeed => "succeed",
            Behavior::Fail => "fail",
            Behavior::Do(_) => "do",
            Behavior::DoSucceed(_) => "do_succeed",
            Behavior::TestFun(_) => "test_fun",
            Behavior::Wait(_) => "wait",
            Behavior::Sequence(_) => "sequence",
            Behavior::Selector(_) => "selector",
            Behavior::Parallel(Strategy::Forall, _) => "forall",
            Behavior::Parallel(Strategy::Exists, _) => "exists",
            Behavior::Invert(_) => "invert",
            Behavior::AlwaysSucceed(_) => "always_succeed",
        }
    }

    /// Returns the `index`-th direct child, if any.
    pub fn child(&self, index: usize) -> Option<&Behavior> {
        match self {
            Behavior::Sequence(steps)
            | Behavior::Selector(steps)
            | Behavior::Parallel(_, steps) => steps.get(index),
            Behavior::Invert(child) | Behavior::AlwaysSucceed(child) => {
                (index == 0).then_some(child.as_ref())
            }
            _ => None,
        }
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        match self {
            Behavior::Sequence(steps)
            | Behavior::Selector(steps)
            | Behavior::Parallel(_, steps) => steps.len(),
            Behavior::Invert(_) | Behavior::AlwaysSucceed(_) => 1,
            _ => 0,
        }
    }

    /// Total number of nodes in this tree.
    pub fn node_count(&self) -> usize {
        1 + (0..self.child_count())
            .filter_map(|i| self.child(i))
            .map(Behavior::node_count)
            .sum::<usize>()
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::Succeed | Behavior::Fail | Behavior::Do(_) | Behavior::DoSucceed(_)
            | Behavior::TestFun(_) => f.write_str(self.kind()),
            Behavior::Wait(event) => f.debug_tuple("wait").field(event).finish(),
            Behavior::Sequence(steps) | Behavior::Selector(steps) | Behavior::Parallel(_, steps) => {
                f.debug_tuple(self.kind()).field(&&steps[..]).finish()
            }
            Behavior::Invert(child) | Behavior::AlwaysSucceed(child) => {
                f.debug_tuple(self.kind()).field(child).finish()
            }
        }
    }
}
