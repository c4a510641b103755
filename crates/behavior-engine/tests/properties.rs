mod common;

use std::panic::{AssertUnwindSafe, catch_unwind};

use behavior_engine::builder::*;
use behavior_engine::{EngineError, Future, Outcome, Status, Strategy, run};
use common::{Log, init_tracing};
use reactive::Event;

#[test]
fn event_free_trees_resolve_before_run_returns() {
    init_tracing();
    let trees = [
        succeed(),
        fail(),
        sequence(vec![succeed(), do_step(|| true)]),
        selector(vec![fail(), test_fun(|| false)]),
        forall(vec![succeed(), always_succeed(fail())]),
        exists(vec![fail(), invert(fail())]),
    ];

    for tree in &trees {
        let future = run(tree);
        assert!(future.current_value().is_terminal(), "{tree:?} left pending");
    }
}

#[test]
fn sequence_runs_steps_in_declared_order() {
    init_tracing();
    let log = Log::new();
    let tree = sequence(vec![log.push(3), log.push(2), log.equals(vec![2, 3]), log.push(1)]);

    let future = run(&tree);

    assert_eq!(future.current_value(), Outcome::Succeeded);
    assert_eq!(log.entries(), vec![1, 2, 3]);
}

#[test]
fn sequence_suspends_on_wait_and_never_reverts() {
    init_tracing();
    let event = Event::new();
    let future = run(&sequence(vec![wait(&event), succeed()]));

    assert_eq!(future.current_value(), Outcome::Pending);

    event.fire().unwrap();
    assert_eq!(future.current_value(), Outcome::Succeeded);

    assert!(!future.resolve(Status::Failure));
    assert_eq!(future.current_value(), Outcome::Succeeded);
}

#[test]
fn forall_fails_without_waiting_for_pending_branches() {
    init_tracing();
    let event = Event::new();
    let future = run(&parallel(
        Strategy::Forall,
        vec![sequence(vec![wait(&event), succeed()]), fail()],
    ));

    assert_eq!(future.current_value(), Outcome::Failed);

    // The abandoned wait was unsubscribed; firing changes nothing.
    assert_eq!(event.fire(), Ok(0));
    assert_eq!(future.current_value(), Outcome::Failed);
}

#[test]
fn exists_ignores_a_lone_failure() {
    init_tracing();
    let event = Event::new();
    let future = run(&parallel(
        Strategy::Exists,
        vec![sequence(vec![wait(&event), succeed()]), fail()],
    ));

    assert_eq!(future.current_value(), Outcome::Pending);

    event.fire().unwrap();
    assert_eq!(future.current_value(), Outcome::Succeeded);
}

#[test]
fn exists_fails_only_after_every_branch_fails() {
    init_tracing();
    let event = Event::new();
    let future = run(&exists(vec![sequence(vec![wait(&event), fail()]), fail()]));

    assert!(future.is_pending());
    event.fire().unwrap();
    assert_eq!(future.current_value(), Outcome::Failed);
}

#[test]
fn forall_late_success_cannot_override_failure() {
    init_tracing();
    let first = Event::new();
    let second = Event::new();
    let future = run(&forall(vec![
        sequence(vec![wait(&first), fail()]),
        sequence(vec![wait(&second), succeed()]),
    ]));

    assert!(future.is_pending());
    first.fire().unwrap();
    assert_eq!(future.current_value(), Outcome::Failed);

    second.fire().unwrap();
    assert_eq!(future.current_value(), Outcome::Failed);
}

#[test]
fn empty_composites() {
    init_tracing();
    assert_eq!(run(&sequence(vec![])).current_value(), Outcome::Succeeded);
    assert_eq!(run(&parallel(Strategy::Forall, vec![])).current_value(), Outcome::Succeeded);
    assert_eq!(run(&parallel(Strategy::Exists, vec![])).current_value(), Outcome::Failed);
    assert_eq!(run(&selector(vec![])).current_value(), Outcome::Failed);
}

#[test]
fn resolving_twice_keeps_value_and_notifies_once() {
    let future = Future::pending();
    let notified = std::rc::Rc::new(std::cell::Cell::new(0));
    {
        let notified = notified.clone();
        future.subscribe(move |_| notified.set(notified.get() + 1));
    }

    assert!(future.resolve(Status::Success));
    assert!(!future.resolve(Status::Success));
    assert!(!future.resolve(Status::Failure));

    assert_eq!(future.current_value(), Outcome::Succeeded);
    assert_eq!(notified.get(), 1);
}

#[test]
fn reruns_of_one_tree_are_independent() {
    init_tracing();
    let make = || {
        let event = Event::new();
        (event.clone(), sequence(vec![wait(&event), succeed()]))
    };
    let (first_event, first_tree) = make();
    let (_second_event, second_tree) = make();

    let first = run(&first_tree);
    let second = run(&second_tree);
    first_event.fire().unwrap();

    assert_eq!(first.current_value(), Outcome::Succeeded);
    assert_eq!(second.current_value(), Outcome::Pending);
}

#[test]
fn same_tree_value_runs_twice() {
    init_tracing();
    let log = Log::new();
    let gate = Event::new();
    let tree = sequence(vec![log.push(1), wait(&gate), log.push(2)]);

    let first = run(&tree);
    let second = run(&tree);
    assert!(first.is_pending() && second.is_pending());
    assert_eq!(log.entries(), vec![1, 1]);

    gate.fire().unwrap();
    assert_eq!(first.current_value(), Outcome::Succeeded);
    assert_eq!(second.current_value(), Outcome::Succeeded);
    assert_eq!(log.entries(), vec![2, 2, 1, 1]);

    // Already fired: a third run does not suspend.
    assert_eq!(run(&tree).current_value(), Outcome::Succeeded);
}

#[test]
fn step_panic_reaches_the_caller_of_run() {
    let tree = sequence(vec![succeed(), do_step(|| panic!("step fault"))]);
    let result = catch_unwind(AssertUnwindSafe(|| run(&tree)));
    assert!(result.is_err());
}

#[test]
fn step_panic_reaches_the_caller_of_fire() {
    let event = Event::new();
    let future = run(&sequence(vec![wait(&event), do_step(|| panic!("step fault"))]));
    assert!(future.is_pending());

    let result = catch_unwind(AssertUnwindSafe(|| event.fire()));
    assert!(result.is_err());
    assert!(future.is_pending());
}

#[test]
fn pending_result_is_an_error() -> behavior_engine::Result<()> {
    let event = Event::new();
    let future = run(&wait(&event));
    assert_eq!(future.result(), Err(EngineError::Pending));

    event.fire()?;
    assert!(future.result()?);

    let spent = event.fire().map_err(EngineError::from);
    assert!(matches!(spent, Err(EngineError::Reactive(_))));
    Ok(())
}
