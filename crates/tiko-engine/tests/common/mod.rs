//! Shared helpers for the scheduler integration suites

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use tiko_engine::TickScheduler;
use tiko_sdk::{MicrotaskEngine, TaskKind, TaskObserver, TickId};

/// One observer notification, flattened for easy assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    Init { id: u64, kind: TaskKind, trigger: u64 },
    Before { id: u64, trigger: u64 },
    After { id: u64 },
    Destroy { id: u64 },
}

/// Observer that records every notification in arrival order
#[derive(Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<HookEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HookEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, wanted: &HookEvent) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| *event == wanted)
            .count()
    }
}

impl TaskObserver for RecordingObserver {
    fn init(&self, id: TickId, kind: TaskKind, trigger: TickId) {
        self.events.borrow_mut().push(HookEvent::Init {
            id: id.as_u64(),
            kind,
            trigger: trigger.as_u64(),
        });
    }

    fn before(&self, id: TickId, trigger: TickId) {
        self.events.borrow_mut().push(HookEvent::Before {
            id: id.as_u64(),
            trigger: trigger.as_u64(),
        });
    }

    fn after(&self, id: TickId) {
        self.events
            .borrow_mut()
            .push(HookEvent::After { id: id.as_u64() });
    }

    fn destroy(&self, id: TickId) {
        self.events
            .borrow_mut()
            .push(HookEvent::Destroy { id: id.as_u64() });
    }
}

/// Microtask engine with scriptable rejection warnings and drain counting
#[derive(Default)]
pub struct ScriptedMicrotasks {
    queue: RefCell<VecDeque<Box<dyn FnOnce()>>>,
    warnings: RefCell<Vec<String>>,
    reported: RefCell<Vec<String>>,
    drain_calls: Cell<u32>,
}

impl ScriptedMicrotasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a rejection warning the next `process_rejections` will report
    pub fn add_warning(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }

    pub fn reported(&self) -> Vec<String> {
        self.reported.borrow().clone()
    }

    pub fn drain_calls(&self) -> u32 {
        self.drain_calls.get()
    }
}

impl MicrotaskEngine for ScriptedMicrotasks {
    fn run_microtasks(&self) {
        self.drain_calls.set(self.drain_calls.get() + 1);
        loop {
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(microtask) => microtask(),
                None => break,
            }
        }
    }

    fn enqueue_microtask(&self, microtask: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push_back(microtask);
    }

    fn process_rejections(&self) -> bool {
        let pending: Vec<String> = self.warnings.borrow_mut().drain(..).collect();
        let found = !pending.is_empty();
        self.reported.borrow_mut().extend(pending);
        found
    }
}

pub struct Harness {
    pub scheduler: Rc<TickScheduler>,
    pub engine: Rc<ScriptedMicrotasks>,
    pub observer: Rc<RecordingObserver>,
}

/// Scheduler wired to a scripted engine and a recording observer
pub fn harness() -> Harness {
    let engine = Rc::new(ScriptedMicrotasks::new());
    let observer = Rc::new(RecordingObserver::new());
    let scheduler = Rc::new(TickScheduler::with_observer(
        engine.clone(),
        observer.clone(),
    ));
    Harness {
        scheduler,
        engine,
        observer,
    }
}

/// Shared execution log for ordering assertions
pub type Log = Rc<RefCell<Vec<&'static str>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}
