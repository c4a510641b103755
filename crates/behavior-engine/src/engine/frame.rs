//! Per-run side table of node progress.
//!
//! The behavior tree is never mutated. Each node a run reaches gets a
//! [`Frame`] in the run's [`FrameArena`], keyed by [`FrameId`], holding its
//! resumption state and its event subscription if it is suspended.

use reactive::Subscription;

use crate::composite::{Next, OrderedProgress, ParallelProgress};
use crate::decorator::Decorator;
use crate::{Behavior, Status};

pub(crate) type FrameId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameState {
    Pending,
    Settled(Status),
    /// An ancestor settled first; nothing in this frame runs any more.
    Abandoned,
}

#[derive(Debug)]
enum Progress {
    Leaf,
    Ordered(OrderedProgress),
    Parallel(ParallelProgress),
    Decorator(Decorator),
}

impl Progress {
    fn for_behavior(behavior: &Behavior) -> Self {
        match behavior {
            Behavior::Sequence(steps) => Progress::Ordered(OrderedProgress::sequence(steps.len())),
            Behavior::Selector(steps) => Progress::Ordered(OrderedProgress::selector(steps.len())),
            Behavior::Parallel(strategy, branches) => {
                Progress::Parallel(ParallelProgress::new(*strategy, branches.len()))
            }
            Behavior::Invert(_) => Progress::Decorator(Decorator::Invert),
            Behavior::AlwaysSucceed(_) => Progress::Decorator(Decorator::AlwaysSucceed),
            _ => Progress::Leaf,
        }
    }
}

pub(crate) struct Frame {
    behavior: Behavior,
    parent: Option<FrameId>,
    slot: usize,
    state: FrameState,
    progress: Progress,
    children: Vec<FrameId>,
    subscription: Option<Subscription>,
    /// Started under a Parallel that had already settled: runs, but reports to nobody.
    detached: bool,
}

/// Result of settling a frame.
pub(crate) struct Settled {
    /// Parent frame and this frame's index in it; `None` for the root.
    pub parent: Option<(FrameId, usize)>,
    /// Subscriptions of the frame and its abandoned descendants, to be cancelled.
    pub released: Vec<Subscription>,
}

#[derive(Default)]
pub(crate) struct FrameArena {
    frames: Vec<Frame>,
}

impl FrameArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    /// Allocates a pending frame for `behavior` under `parent`.
    ///
    /// The frame is detached if `parent` is no longer pending or is itself
    /// detached.
    pub(crate) fn insert(
        &mut self,
        parent: Option<FrameId>,
        slot: usize,
        behavior: Behavior,
    ) -> FrameId {
        let id = self.frames.len();
        let detached = parent.is_some_and(|parent| {
            let parent = &self.frames[parent];
            parent.detached || parent.state != FrameState::Pending
        });
        self.frames.push(Frame {
            progress: Progress::for_behavior(&behavior),
            behavior,
            parent,
            slot,
            state: FrameState::Pending,
            children: Vec::new(),
            subscription: None,
            detached,
        });
        if let Some(parent) = parent {
            self.frames[parent].children.push(id);
        }
        id
    }

    pub(crate) fn state(&self, id: FrameId) -> FrameState {
        self.frames[id].state
    }

    pub(crate) fn is_pending(&self, id: FrameId) -> bool {
        self.state(id) == FrameState::Pending
    }

    pub(crate) fn is_detached(&self, id: FrameId) -> bool {
        self.frames[id].detached
    }

    /// Whether children of `id` are entered even after it stopped being pending.
    ///
    /// Parallel branches always start; ordered steps and decorated children
    /// are not entered under a terminal parent.
    pub(crate) fn enters_all_children(&self, id: FrameId) -> bool {
        matches!(self.frames[id].progress, Progress::Parallel(_))
    }

    /// Gives up on a pending frame without settling it.
    pub(crate) fn abandon(&mut self, id: FrameId) {
        let frame = &mut self.frames[id];
        if frame.state == FrameState::Pending {
            frame.state = FrameState::Abandoned;
        }
    }

    pub(crate) fn kind(&self, id: FrameId) -> &'static str {
        self.frames[id].behavior.kind()
    }

    /// Clone of the behavior at `slot` under frame `id`.
    pub(crate) fn child_behavior(&self, id: FrameId, slot: usize) -> Option<Behavior> {
        self.frames[id].behavior.child(slot).cloned()
    }

    /// Clones of every direct child behavior of frame `id`, in order.
    pub(crate) fn child_behaviors(&self, id: FrameId) -> Vec<Behavior> {
        let behavior = &self.frames[id].behavior;
        (0..behavior.child_count())
            .filter_map(|slot| behavior.child(slot).cloned())
            .collect()
    }

    /// First step for a composite frame.
    pub(crate) fn start(&self, id: FrameId) -> Next {
        match &self.frames[id].progress {
            Progress::Ordered(progress) => progress.start(),
            Progress::Parallel(progress) => progress.start(),
            Progress::Decorator(decorator) => decorator.start(),
            Progress::Leaf => Next::Wait,
        }
    }

    /// Records that child `slot` of frame `id` settled.
    ///
    /// Returns [`Next::Wait`] if `id` is no longer pending.
    pub(crate) fn on_child(&mut self, id: FrameId, slot: usize, status: Status) -> Next {
        let frame = &mut self.frames[id];
        if frame.state != FrameState::Pending {
            return Next::Wait;
        }
        match &mut frame.progress {
            Progress::Ordered(progress) => progress.on_child(slot, status),
            Progress::Parallel(progress) => progress.on_branch(slot, status),
            Progress::Decorator(decorator) => decorator.on_child(status),
            Progress::Leaf => Next::Wait,
        }
    }

    /// Stores the subscription a suspended frame is waiting on.
    pub(crate) fn attach(&mut self, id: FrameId, subscription: Subscription) {
        self.frames[id].subscription = Some(subscription);
    }

    /// Marks frame `id` terminal and abandons every pending descendant.
    ///
    /// Returns `None` if the frame was not pending; settling is idempotent.
    pub(crate) fn settle(&mut self, id: FrameId, status: Status) -> Option<Settled> {
        let frame = &mut self.frames[id];
        if frame.state != FrameState::Pending {
            return None;
        }
        frame.state = FrameState::Settled(status);

        let mut released: Vec<Subscription> = frame.subscription.take().into_iter().collect();
        let parent = frame.parent.map(|parent| (parent, frame.slot));

        let mut stack = frame.children.clone();
        while let Some(child) = stack.pop() {
            let child = &mut self.frames[child];
            if child.state != FrameState::Pending {
                continue;
            }
            child.state = FrameState::Abandoned;
            released.extend(child.subscription.take());
            stack.extend(child.children.iter().copied());
        }

        Some(Settled { parent, released })
    }

    /// Number of frames still pending.
    pub(crate) fn pending_count(&self) -> usize {
        self.frames
            .iter()
            .filter(|frame| frame.state == FrameState::Pending)
            .count()
    }
}
