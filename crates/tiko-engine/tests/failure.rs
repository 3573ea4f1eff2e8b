//! Failure semantics: a failing record completes its cleanup
//! notifications, aborts the current pass, and leaves later records for
//! the next one.

mod common;

use common::{harness, new_log, HookEvent};
use tiko_engine::{ContextFrame, SchedulerError};
use tiko_sdk::{CallbackError, TaskValue};

#[test]
fn test_failure_isolation() {
    let h = harness();
    let log = new_log();

    {
        let log = log.clone();
        h.scheduler.schedule(move || log.borrow_mut().push("R1"));
    }
    let failing = TaskValue::callable_fn(|_| Err(CallbackError::new("R2 exploded")));
    h.scheduler.schedule_deferred(&failing, &[]).unwrap();
    {
        let log = log.clone();
        h.scheduler.schedule(move || log.borrow_mut().push("R3"));
    }

    let err = h.scheduler.process_ticks_and_rejections().unwrap_err();
    match err {
        SchedulerError::CallbackFailure { id, source } => {
            assert_eq!(id.as_u64(), 2);
            assert_eq!(source.to_string(), "R2 exploded");
        }
        other => panic!("unexpected error: {other}"),
    }

    // R1 ran to completion before the failure.
    assert_eq!(*log.borrow(), vec!["R1"]);

    // The failing record's cleanup notifications fired exactly once.
    assert_eq!(h.observer.count(&HookEvent::Destroy { id: 2 }), 1);
    assert_eq!(h.observer.count(&HookEvent::After { id: 2 }), 1);

    // R3 was never started in the aborted pass.
    assert_eq!(h.observer.count(&HookEvent::Before { id: 3, trigger: 0 }), 0);

    // The pending flag survives a failed pass so the host retries.
    assert!(h.scheduler.has_tick_scheduled());
    assert_eq!(h.scheduler.stats().pending_estimate, 1);

    // The next pass picks up where the failed one stopped.
    h.scheduler.process_ticks_and_rejections().unwrap();
    assert_eq!(*log.borrow(), vec!["R1", "R3"]);
    assert!(!h.scheduler.has_tick_scheduled());
    assert_eq!(h.scheduler.stats().pending_estimate, 0);
}

#[test]
fn test_frame_and_trigger_restored_after_failure() {
    let h = harness();

    let host_frame = ContextFrame::new("host-scope");
    h.scheduler.swap_frame(host_frame.clone());

    let failing = TaskValue::callable_fn(|_| Err(CallbackError::new("bad")));
    h.scheduler.schedule_deferred(&failing, &[]).unwrap();

    assert!(h.scheduler.process_ticks_and_rejections().is_err());
    assert_eq!(h.scheduler.current_frame(), host_frame);

    // Submissions made now are triggered by the root again, not by the
    // failed record.
    h.scheduler.schedule(|| {});
    let events = h.observer.events();
    assert!(events
        .iter()
        .any(|event| matches!(event, HookEvent::Init { id: 2, trigger: 0, .. })));
}

#[test]
fn test_failing_microtask_does_not_abort_drain() {
    let h = harness();
    let log = new_log();

    h.scheduler
        .queue_microtask(&TaskValue::callable_fn(|_| {
            Err(CallbackError::new("microtask boom"))
        }))
        .unwrap();
    {
        let log = log.clone();
        h.scheduler.microtask(move || log.borrow_mut().push("M2"));
    }

    // The wrapped failure is swallowed by the fire-and-forget contract.
    h.scheduler.run_if_needed().unwrap();
    assert_eq!(*log.borrow(), vec!["M2"]);

    // The failing microtask still got its full bracketing.
    assert_eq!(h.observer.count(&HookEvent::Destroy { id: 1 }), 1);
    assert_eq!(h.observer.count(&HookEvent::After { id: 1 }), 1);
}

#[test]
fn test_failure_in_nested_record_preserves_outer_cleanup() {
    let h = harness();
    let log = new_log();

    {
        let scheduler = h.scheduler.clone();
        let log = log.clone();
        h.scheduler.schedule(move || {
            log.borrow_mut().push("parent");
            let failing = TaskValue::callable_fn(|_| Err(CallbackError::new("child failed")));
            scheduler.schedule_deferred(&failing, &[]).unwrap();
        });
    }

    let err = h.scheduler.process_ticks_and_rejections().unwrap_err();
    assert!(matches!(err, SchedulerError::CallbackFailure { .. }));
    assert_eq!(*log.borrow(), vec!["parent"]);

    // Parent completed normally: one destroy, one after.
    assert_eq!(h.observer.count(&HookEvent::Destroy { id: 1 }), 1);
    assert_eq!(h.observer.count(&HookEvent::After { id: 1 }), 1);
    // The failed child carried the parent as trigger.
    assert_eq!(h.observer.count(&HookEvent::Before { id: 2, trigger: 1 }), 1);
}
