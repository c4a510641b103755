//! One execution of a behavior tree.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use reactive::Event;
use tracing::{Span, debug, debug_span, trace};

use super::frame::{FrameArena, FrameId};
use crate::composite::Next;
use crate::{Behavior, EngineConfig, Future, Status};

enum Task {
    Enter {
        parent: Option<FrameId>,
        slot: usize,
        behavior: Behavior,
    },
    Settle {
        frame: FrameId,
        status: Status,
    },
}

/// Execution state of a single run.
///
/// Work is a stack of [`Task`]s drained to a fixed point, so deep trees and
/// long chains of immediately resolvable steps never recurse. The instance is
/// owned by the subscriptions of its suspended `Wait` frames; once the root
/// settles every subscription is cancelled and the instance is dropped.
pub(crate) struct RunInstance {
    id: u64,
    log_transitions: bool,
    outcome: Future,
    frames: RefCell<FrameArena>,
    tasks: RefCell<Vec<Task>>,
    draining: Cell<bool>,
    span: Span,
}

/// Clears the draining flag even if a step function unwinds.
///
/// On unwind the queued work is discarded too: those nodes were due at the
/// moment of the panic and must not run inside some later `fire`.
struct DrainGuard<'a> {
    draining: &'a Cell<bool>,
    tasks: &'a RefCell<Vec<Task>>,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking()
            && let Ok(mut tasks) = self.tasks.try_borrow_mut()
        {
            tasks.clear();
        }
        self.draining.set(false);
    }
}

impl RunInstance {
    pub(crate) fn new(id: u64, config: &EngineConfig, outcome: Future) -> Rc<Self> {
        let span = debug_span!(
            target: "behavior_engine::engine",
            "run",
            label = %config.label,
            run_id = id
        );
        Rc::new(Self {
            id,
            log_transitions: config.log_transitions,
            outcome,
            frames: RefCell::new(FrameArena::new()),
            tasks: RefCell::new(Vec::new()),
            draining: Cell::new(false),
            span,
        })
    }

    /// Evaluates `root` synchronously as far as it goes.
    pub(crate) fn start(self: &Rc<Self>, root: Behavior) {
        self.tasks.borrow_mut().push(Task::Enter {
            parent: None,
            slot: 0,
            behavior: root,
        });
        self.drain();
    }

    /// Called when the event a `Wait` frame subscribed to fires.
    fn resume(self: &Rc<Self>, frame: FrameId) {
        self.tasks.borrow_mut().push(Task::Settle {
            frame,
            status: Status::Success,
        });
        self.drain();
    }

    fn drain(self: &Rc<Self>) {
        // A step function fired an event this run waits on: the task is
        // already queued and the outer loop picks it up.
        if self.draining.replace(true) {
            return;
        }
        let _guard = DrainGuard {
            draining: &self.draining,
            tasks: &self.tasks,
        };
        let _entered = self.span.enter();

        loop {
            let task = self.tasks.borrow_mut().pop();
            match task {
                Some(Task::Enter {
                    parent,
                    slot,
                    behavior,
                }) => self.enter(parent, slot, behavior),
                Some(Task::Settle { frame, status }) => self.settle(frame, status),
                None => break,
            }
        }
    }

    fn enter(self: &Rc<Self>, parent: Option<FrameId>, slot: usize, behavior: Behavior) {
        // Ordered steps and decorated children stop at a terminal parent;
        // parallel branches are always started.
        if let Some(parent) = parent
            && !self.frames.borrow().is_pending(parent)
            && !self.frames.borrow().enters_all_children(parent)
        {
            trace!(
                target: "behavior_engine::engine",
                parent,
                slot,
                kind = behavior.kind(),
                "parent already terminal, not entering"
            );
            return;
        }

        let frame = self
            .frames
            .borrow_mut()
            .insert(parent, slot, behavior.clone());

        // Step functions run with no borrow held: they may fire events.
        let next = match &behavior {
            Behavior::Succeed => Next::Settle(Status::Success),
            Behavior::Fail => Next::Settle(Status::Failure),
            Behavior::Do(step) | Behavior::TestFun(step) => Next::Settle(Status::from(step())),
            Behavior::DoSucceed(effect) => {
                effect();
                Next::Settle(Status::Success)
            }
            Behavior::Wait(event) => self.wait_on(frame, event),
            _ => self.frames.borrow().start(frame),
        };

        self.apply(frame, next);
    }

    fn wait_on(self: &Rc<Self>, frame: FrameId, event: &Event) -> Next {
        if event.has_fired() {
            return Next::Settle(Status::Success);
        }
        // Nothing would observe the result, so never subscribe.
        if self.frames.borrow().is_detached(frame) {
            self.frames.borrow_mut().abandon(frame);
            self.log_transition(frame, "released");
            return Next::Wait;
        }

        let instance = Rc::clone(self);
        let subscription = event.subscribe(move || instance.resume(frame));
        self.frames.borrow_mut().attach(frame, subscription);
        self.log_transition(frame, "suspended");
        Next::Wait
    }

    fn apply(&self, frame: FrameId, next: Next) {
        match next {
            Next::Enter(slot) => {
                let child = self.frames.borrow().child_behavior(frame, slot);
                if let Some(behavior) = child {
                    self.tasks.borrow_mut().push(Task::Enter {
                        parent: Some(frame),
                        slot,
                        behavior,
                    });
                }
            }
            Next::EnterAll => {
                let children = self.frames.borrow().child_behaviors(frame);
                // Reversed so the first branch is popped, and run, first.
                let mut tasks = self.tasks.borrow_mut();
                for (slot, behavior) in children.into_iter().enumerate().rev() {
                    tasks.push(Task::Enter {
                        parent: Some(frame),
                        slot,
                        behavior,
                    });
                }
            }
            Next::Settle(status) => self.tasks.borrow_mut().push(Task::Settle { frame, status }),
            Next::Wait => {}
        }
    }

    fn settle(&self, frame: FrameId, status: Status) {
        let settled = self.frames.borrow_mut().settle(frame, status);
        let Some(settled) = settled else {
            trace!(
                target: "behavior_engine::engine",
                frame,
                ?status,
                "late result ignored"
            );
            return;
        };

        let mut cancelled = 0;
        for subscription in &settled.released {
            if subscription.cancel() {
                cancelled += 1;
            }
        }
        self.log_settled(frame, status, cancelled);

        match settled.parent {
            None => self.finish(status),
            Some((parent, slot)) => {
                let next = self.frames.borrow_mut().on_child(parent, slot, status);
                self.apply(parent, next);
            }
        }
    }

    fn finish(&self, status: Status) {
        let frames = self.frames.borrow().len();
        if self.outcome.resolve(status) {
            debug!(
                target: "behavior_engine::engine",
                run_id = self.id,
                ?status,
                frames,
                "run resolved"
            );
        }
    }

    fn log_transition(&self, frame: FrameId, transition: &'static str) {
        let kind = self.frames.borrow().kind(frame);
        if self.log_transitions {
            debug!(target: "behavior_engine::engine", frame, kind, transition);
        } else {
            trace!(target: "behavior_engine::engine", frame, kind, transition);
        }
    }

    fn log_settled(&self, frame: FrameId, status: Status, cancelled: usize) {
        let kind = self.frames.borrow().kind(frame);
        if self.log_transitions {
            debug!(target: "behavior_engine::engine", frame, kind, ?status, cancelled, "settled");
        } else {
            trace!(target: "behavior_engine::engine", frame, kind, ?status, cancelled, "settled");
        }
    }
}

impl Drop for RunInstance {
    fn drop(&mut self) {
        trace!(
            target: "behavior_engine::engine",
            run_id = self.id,
            pending = self.frames.get_mut().pending_count(),
            "run instance released"
        );
    }
}
