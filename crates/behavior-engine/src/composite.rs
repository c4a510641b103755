//! Combination rules for composite nodes.
//!
//! Composite nodes decide what happens after each child settles. The rules
//! here are pure: they only track per-run progress and tell the engine what to
//! do [`Next`]. Entering children and propagating results is the engine's job.

use crate::{Status, Strategy};

/// What a node asks the engine to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Next {
    /// Enter the child at this index.
    Enter(usize),
    /// Enter every child, first to last.
    EnterAll,
    /// The node is terminal with this status.
    Settle(Status),
    /// Nothing to do until another child settles or an event fires.
    Wait,
}

/// Progress of a [`Sequence`](crate::Behavior::Sequence) or
/// [`Selector`](crate::Behavior::Selector).
///
/// # Semantics
///
/// Steps run strictly one after another, left to right. A step is entered only
/// once the previous one is terminal.
///
/// - Sequence: stops at the first `Failure`; `Success` once every step succeeded
///   (short-circuited logical AND)
/// - Selector: stops at the first `Success`; `Failure` once every step failed
///   (short-circuited logical OR)
#[derive(Debug)]
pub(crate) struct OrderedProgress {
    stop_on: Status,
    len: usize,
    active: usize,
}

impl OrderedProgress {
    pub(crate) fn sequence(len: usize) -> Self {
        Self {
            stop_on: Status::Failure,
            len,
            active: 0,
        }
    }

    pub(crate) fn selector(len: usize) -> Self {
        Self {
            stop_on: Status::Success,
            len,
            active: 0,
        }
    }

    pub(crate) fn start(&self) -> Next {
        if self.len == 0 {
            // Vacuous: no step can stop it.
            Next::Settle(self.stop_on.invert())
        } else {
            Next::Enter(0)
        }
    }

    pub(crate) fn on_child(&mut self, slot: usize, status: Status) -> Next {
        if slot != self.active {
            return Next::Wait;
        }
        if status == self.stop_on {
            return Next::Settle(status);
        }

        self.active += 1;
        if self.active == self.len {
            Next::Settle(status)
        } else {
            Next::Enter(self.active)
        }
    }

    /// Index of the step currently running.
    #[cfg(test)]
    pub(crate) fn active(&self) -> usize {
        self.active
    }
}

/// Progress of a [`Parallel`](crate::Behavior::Parallel) node.
///
/// # Semantics
///
/// Every branch is started; each one is tracked independently.
///
/// - A branch settling with the strategy's decisive status settles the node at
///   once, whatever the other branches are doing
/// - Otherwise the node settles only when the last branch does
/// - Zero branches settle immediately with [`Strategy::exhausted`]
#[derive(Debug)]
pub(crate) struct ParallelProgress {
    strategy: Strategy,
    branches: Vec<Option<Status>>,
    settled: usize,
}

impl ParallelProgress {
    pub(crate) fn new(strategy: Strategy, len: usize) -> Self {
        Self {
            strategy,
            branches: vec![None; len],
            settled: 0,
        }
    }

    pub(crate) fn start(&self) -> Next {
        if self.branches.is_empty() {
            Next::Settle(self.strategy.exhausted())
        } else {
            Next::EnterAll
        }
    }

    pub(crate) fn on_branch(&mut self, slot: usize, status: Status) -> Next {
        let Some(entry) = self.branches.get_mut(slot) else {
            return Next::Wait;
        };
        if entry.is_some() {
            return Next::Wait;
        }
        *entry = Some(status);
        self.settled += 1;

        if status == self.strategy.decisive() {
            Next::Settle(status)
        } else if self.settled == self.branches.len() {
            Next::Settle(self.strategy.exhausted())
        } else {
            Next::Wait
        }
    }

    /// Status of each branch that has settled so far.
    #[cfg(test)]
    pub(crate) fn branches(&self) -> &[Option<Status>] {
        &self.branches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_advances_until_failure() {
        let mut seq = OrderedProgress::sequence(3);
        assert_eq!(seq.start(), Next::Enter(0));
        assert_eq!(seq.on_child(0, Status::Success), Next::Enter(1));
        assert_eq!(seq.active(), 1);
        assert_eq!(seq.on_child(1, Status::Failure), Next::Settle(Status::Failure));
    }

    #[test]
    fn sequence_all_success() {
        let mut seq = OrderedProgress::sequence(2);
        assert_eq!(seq.on_child(0, Status::Success), Next::Enter(1));
        assert_eq!(seq.on_child(1, Status::Success), Next::Settle(Status::Success));
    }

    #[test]
    fn selector_succeeds_on_first_success() {
        let mut sel = OrderedProgress::selector(3);
        assert_eq!(sel.on_child(0, Status::Failure), Next::Enter(1));
        assert_eq!(sel.on_child(1, Status::Success), Next::Settle(Status::Success));
    }

    #[test]
    fn selector_fails_when_all_fail() {
        let mut sel = OrderedProgress::selector(2);
        assert_eq!(sel.on_child(0, Status::Failure), Next::Enter(1));
        assert_eq!(sel.on_child(1, Status::Failure), Next::Settle(Status::Failure));
    }

    #[test]
    fn empty_ordered_nodes() {
        assert_eq!(OrderedProgress::sequence(0).start(), Next::Settle(Status::Success));
        assert_eq!(OrderedProgress::selector(0).start(), Next::Settle(Status::Failure));
    }

    #[test]
    fn stale_step_result_is_ignored() {
        let mut seq = OrderedProgress::sequence(3);
        assert_eq!(seq.on_child(2, Status::Success), Next::Wait);
        assert_eq!(seq.active(), 0);
    }

    #[test]
    fn forall_fails_at_first_failure() {
        let mut par = ParallelProgress::new(Strategy::Forall, 3);
        assert_eq!(par.start(), Next::EnterAll);
        assert_eq!(par.on_branch(2, Status::Success), Next::Wait);
        assert_eq!(par.on_branch(1, Status::Failure), Next::Settle(Status::Failure));
        assert_eq!(par.branches(), &[None, Some(Status::Failure), Some(Status::Success)]);
    }

    #[test]
    fn forall_succeeds_when_every_branch_succeeds() {
        let mut par = ParallelProgress::new(Strategy::Forall, 2);
        assert_eq!(par.on_branch(0, Status::Success), Next::Wait);
        assert_eq!(par.on_branch(1, Status::Success), Next::Settle(Status::Success));
    }

    #[test]
    fn exists_waits_out_single_failure() {
        let mut par = ParallelProgress::new(Strategy::Exists, 2);
        assert_eq!(par.on_branch(1, Status::Failure), Next::Wait);
        assert_eq!(par.on_branch(0, Status::Success), Next::Settle(Status::Success));
    }

    #[test]
    fn exists_fails_when_every_branch_fails() {
        let mut par = ParallelProgress::new(Strategy::Exists, 2);
        assert_eq!(par.on_branch(0, Status::Failure), Next::Wait);
        assert_eq!(par.on_branch(1, Status::Failure), Next::Settle(Status::Failure));
    }

    #[test]
    fn empty_parallel_nodes() {
        assert_eq!(
            ParallelProgress::new(Strategy::Forall, 0).start(),
            Next::Settle(Status::Success)
        );
        assert_eq!(
            ParallelProgress::new(Strategy::Exists, 0).start(),
            Next::Settle(Status::Failure)
        );
    }

    #[test]
    fn branch_settles_only_once() {
        let mut par = ParallelProgress::new(Strategy::Forall, 2);
        assert_eq!(par.on_branch(0, Status::Success), Next::Wait);
        assert_eq!(par.on_branch(0, Status::Success), Next::Wait);
        assert_eq!(par.branches(), &[Some(Status::Success), None]);
    }
}
