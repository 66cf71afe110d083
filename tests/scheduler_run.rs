use std::cell::Cell;
use std::rc::Rc;

use rundag::dag::Scheduler;
use rundag::errors::RundagError;
use rundag_test_utils::init_tracing;
use rundag_test_utils::recorder::InvocationRecorder;

#[test]
fn linear_pipeline_threads_results() {
    init_tracing();

    let mut scheduler = Scheduler::new();
    let a = scheduler.register("a", Box::new(|_| Ok(1)), None).unwrap();
    let b = scheduler
        .register(
            "b",
            Box::new(|input: Option<&i32>| Ok(input.copied().unwrap_or(0) + 1)),
            Some(a),
        )
        .unwrap();

    let results = scheduler.run().unwrap();
    assert_eq!(results[&a], 1);
    assert_eq!(results[&b], 2);
    assert_eq!(results.len(), 2);
}

#[test]
fn empty_scheduler_returns_empty_mapping() {
    let mut scheduler: Scheduler<()> = Scheduler::new();
    assert!(scheduler.run().unwrap().is_empty());
}

#[test]
fn entry_tasks_run_once_with_no_input() {
    let recorder = InvocationRecorder::new();
    let mut scheduler = Scheduler::new();
    scheduler.register("a", recorder.task("a", 1), None).unwrap();
    scheduler.register("b", recorder.task("b", 2), None).unwrap();

    scheduler.run().unwrap();

    // Independent tasks run in registration order, each exactly once,
    // without an input.
    assert_eq!(recorder.events(), vec!["a()", "b()"]);
}

#[test]
fn fan_out_feeds_both_dependents_the_same_result() {
    let recorder = InvocationRecorder::new();
    let mut scheduler = Scheduler::new();
    let a = scheduler.register("a", recorder.task("a", 10), None).unwrap();
    scheduler.register("b", recorder.task("b", 20), Some(a)).unwrap();
    scheduler.register("c", recorder.task("c", 30), Some(a)).unwrap();

    let results = scheduler.run().unwrap();

    assert_eq!(recorder.events(), vec!["a()", "b(10)", "c(10)"]);
    assert_eq!(results.len(), 3);
}

#[test]
fn chain_passes_each_result_one_step_down() {
    let recorder = InvocationRecorder::new();
    let mut scheduler = Scheduler::new();
    let a = scheduler.register("a", recorder.task("a", "one"), None).unwrap();
    let b = scheduler.register("b", recorder.task("b", "two"), Some(a)).unwrap();
    scheduler.register("c", recorder.task("c", "three"), Some(b)).unwrap();

    scheduler.run().unwrap();

    assert_eq!(recorder.events(), vec!["a()", r#"b("one")"#, r#"c("two")"#]);
}

#[test]
fn task_failure_aborts_the_run() {
    init_tracing();

    let recorder = InvocationRecorder::new();
    let mut scheduler = Scheduler::new();
    let a = scheduler.register("a", recorder.task("a", 1), None).unwrap();
    let boom = scheduler
        .register("boom", recorder.failing_task("boom", "exploded"), Some(a))
        .unwrap();
    scheduler.register("c", recorder.task("c", 3), Some(boom)).unwrap();

    let err = scheduler.run().unwrap_err();
    match err {
        RundagError::Task { name, source } => {
            assert_eq!(name, "boom");
            assert_eq!(source.to_string(), "exploded");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Nothing after the failure ran; the partial results were dropped with
    // the error.
    assert_eq!(recorder.events(), vec!["a()", "boom!"]);
}

#[test]
fn depends_on_must_come_from_the_same_scheduler() {
    let mut other: Scheduler<i32> = Scheduler::new();
    let foreign = other.register("x", Box::new(|_| Ok(1)), None).unwrap();

    let mut scheduler: Scheduler<i32> = Scheduler::new();
    let err = scheduler
        .register("y", Box::new(|_| Ok(2)), Some(foreign))
        .unwrap_err();

    assert!(matches!(err, RundagError::UnknownDependency(_)));
    assert!(scheduler.is_empty());
}

#[test]
fn run_rebuilds_results_each_invocation() {
    let counter = Rc::new(Cell::new(0));

    let mut scheduler = Scheduler::new();
    let tick = {
        let counter = Rc::clone(&counter);
        scheduler
            .register(
                "tick",
                Box::new(move |_| {
                    counter.set(counter.get() + 1);
                    Ok(counter.get())
                }),
                None,
            )
            .unwrap()
    };

    let first = scheduler.run().unwrap();
    let second = scheduler.run().unwrap();

    assert_eq!(first[&tick], 1);
    assert_eq!(second[&tick], 2);
}

#[test]
fn registering_the_same_closure_twice_makes_two_tasks() {
    let recorder = InvocationRecorder::new();
    let mut scheduler = Scheduler::new();
    let first = scheduler.register("twice", recorder.task("twice", 1), None).unwrap();
    let second = scheduler.register("twice", recorder.task("twice", 1), None).unwrap();

    assert_ne!(first, second);
    let results = scheduler.run().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(recorder.events(), vec!["twice()", "twice()"]);
}

#[test]
fn execution_order_matches_run_order() {
    let recorder = InvocationRecorder::new();
    let mut scheduler = Scheduler::new();
    let a = scheduler.register("a", recorder.task("a", 1), None).unwrap();
    let b = scheduler.register("b", recorder.task("b", 2), Some(a)).unwrap();
    let c = scheduler.register("c", recorder.task("c", 3), Some(a)).unwrap();

    assert_eq!(scheduler.execution_order(), vec![a, b, c]);
    assert_eq!(scheduler.name_of(b), Some("b"));

    let results = scheduler.run().unwrap();
    assert_eq!(results.keys().copied().collect::<Vec<_>>(), vec![a, b, c]);
}
