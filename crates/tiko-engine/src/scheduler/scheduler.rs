//! TickScheduler — submission and the tick/rejection drain loop
//!
//! The scheduler sits between a host event loop and an external microtask
//! engine. Deferred callbacks go through the tick queue; the drain loop
//! alternates between emptying that queue to a fixpoint (records pushed by
//! running callbacks included) and running microtasks, until both are
//! simultaneously empty and no rejection warning is pending. Strictly
//! single-threaded cooperative: one callback at a time, suspension only by
//! returning.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::error::{SchedulerError, SchedulerResult};
use crate::scheduler::context::{ContextFrame, ContextStore};
use crate::scheduler::queue::{FixedQueue, DEFAULT_CHUNK_CAPACITY};
use crate::scheduler::rejections::{RejectionSignal, RejectionTracker};
use crate::scheduler::task::{CallArgs, TickTask};
use tiko_sdk::{MicrotaskEngine, TaskCallback, TaskKind, TaskObserver, TaskValue, TickId};

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Slot count per tick-queue chunk (normalized to a power of two)
    pub queue_chunk_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            queue_chunk_capacity: DEFAULT_CHUNK_CAPACITY,
        }
    }
}

/// Scheduler statistics.
///
/// Best-effort diagnostic counters. `pending_estimate` in particular is
/// not authoritative — the queue's own emptiness check drives the drain
/// loop.
#[derive(Debug, Clone, Default)]
pub struct SchedulerStats {
    /// Total deferred callbacks accepted
    pub scheduled: u64,

    /// Total deferred callbacks run
    pub processed: u64,

    /// Approximate number of records still queued
    pub pending_estimate: i64,
}

/// The deferred-callback scheduler.
///
/// All methods take `&self`: state lives behind `Cell`/`RefCell` so that a
/// callback running inside the drain loop can submit more work through a
/// shared handle. Hosts typically hold the scheduler in an `Rc` and let
/// callbacks capture clones.
///
/// # Example
///
/// ```rust,ignore
/// use std::rc::Rc;
/// use tiko_engine::TickScheduler;
/// use tiko_sdk::SimpleMicrotaskQueue;
///
/// let scheduler = Rc::new(TickScheduler::new(Rc::new(SimpleMicrotaskQueue::new())));
/// scheduler.schedule(|| println!("deferred"));
/// // host loop, once per iteration:
/// scheduler.run_if_needed()?;
/// ```
pub struct TickScheduler {
    /// Deferred-callback FIFO
    queue: RefCell<FixedQueue<TickTask>>,

    /// Ambient-context store shared with microtask wrappers
    context: ContextStore,

    /// Rejection-warn flag and its signal handles
    rejections: RejectionTracker,

    /// External microtask engine
    microtasks: Rc<dyn MicrotaskEngine>,

    /// Optional tracing collaborator; when absent every notification site
    /// is skipped
    observer: Option<Rc<dyn TaskObserver>>,

    /// Set when the queue turns non-empty, cleared only at full-drain end
    tick_scheduled: Cell<bool>,

    /// Irreversible shutdown latch; late submissions are dropped
    exiting: Cell<bool>,

    /// Next id to assign (ids start above `TickId::ROOT`)
    next_id: Cell<u64>,

    scheduled: Cell<u64>,
    processed: Cell<u64>,
    pending_estimate: Cell<i64>,
}

impl TickScheduler {
    /// Create a scheduler with the default configuration and no observer
    pub fn new(microtasks: Rc<dyn MicrotaskEngine>) -> Self {
        Self::with_config_and_observer(microtasks, SchedulerConfig::default(), None)
    }

    /// Create a scheduler with an observer installed
    pub fn with_observer(
        microtasks: Rc<dyn MicrotaskEngine>,
        observer: Rc<dyn TaskObserver>,
    ) -> Self {
        Self::with_config_and_observer(microtasks, SchedulerConfig::default(), Some(observer))
    }

    /// Create a scheduler with a specific configuration
    pub fn with_config(microtasks: Rc<dyn MicrotaskEngine>, config: SchedulerConfig) -> Self {
        Self::with_config_and_observer(microtasks, config, None)
    }

    /// Create a scheduler with a specific configuration and an optional
    /// observer
    pub fn with_config_and_observer(
        microtasks: Rc<dyn MicrotaskEngine>,
        config: SchedulerConfig,
        observer: Option<Rc<dyn TaskObserver>>,
    ) -> Self {
        Self {
            queue: RefCell::new(FixedQueue::with_chunk_capacity(config.queue_chunk_capacity)),
            context: ContextStore::new(),
            rejections: RejectionTracker::new(),
            microtasks,
            observer,
            tick_scheduled: Cell::new(false),
            exiting: Cell::new(false),
            next_id: Cell::new(TickId::ROOT.as_u64() + 1),
            scheduled: Cell::new(0),
            processed: Cell::new(0),
            pending_estimate: Cell::new(0),
        }
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Submit a deferred callback with bound arguments.
    ///
    /// Never invokes the callback synchronously and never blocks — that is
    /// the defining difference from direct invocation. A non-callable
    /// `callback` fails with [`SchedulerError::InvalidCallback`] before any
    /// state changes. After [`begin_shutdown`](Self::begin_shutdown) the
    /// submission is silently dropped: the callback could never run, so
    /// enqueueing it would be observably wrong.
    pub fn schedule_deferred(
        &self,
        callback: &TaskValue,
        args: &[TaskValue],
    ) -> SchedulerResult<()> {
        let callable = callback
            .as_callable()
            .cloned()
            .ok_or(SchedulerError::InvalidCallback {
                got: callback.type_name(),
            })?;
        self.submit(callable, CallArgs::from_slice(args));
        Ok(())
    }

    /// Submit a plain zero-argument closure as a deferred callback
    pub fn schedule(&self, f: impl Fn() + 'static) {
        self.submit(
            TaskCallback::new(move |_args| {
                f();
                Ok(())
            }),
            CallArgs::None,
        );
    }

    fn submit(&self, callback: TaskCallback, args: CallArgs) {
        if self.exiting.get() {
            trace!("dropping deferred submission after shutdown");
            return;
        }

        if self.queue.borrow().is_empty() {
            self.tick_scheduled.set(true);
        }
        let id = self.allocate_id();
        let trigger = self.context.current_trigger();
        let snapshot = self.context.current();

        if let Some(observer) = &self.observer {
            observer.init(id, TaskKind::Tick, trigger);
        }
        self.queue
            .borrow_mut()
            .push(TickTask::new(id, trigger, snapshot, callback, args));
        self.scheduled.set(self.scheduled.get() + 1);
        self.pending_estimate.set(self.pending_estimate.get() + 1);
        trace!(
            id = id.as_u64(),
            trigger = trigger.as_u64(),
            "deferred callback scheduled"
        );
    }

    /// Submit a callback directly to the microtask engine.
    ///
    /// Bypasses the tick queue entirely: the callback is ordered among
    /// microtasks, not among deferred records. The engine-side wrapper
    /// swaps in the context captured here and brackets the invocation with
    /// observer notifications. A failing microtask callback cannot
    /// propagate out of the engine's drain; it is reported through the
    /// logging facility.
    pub fn queue_microtask(&self, callback: &TaskValue) -> SchedulerResult<()> {
        let callable = callback
            .as_callable()
            .cloned()
            .ok_or(SchedulerError::InvalidCallback {
                got: callback.type_name(),
            })?;
        self.submit_microtask(callable);
        Ok(())
    }

    /// Submit a plain zero-argument closure as a microtask
    pub fn microtask(&self, f: impl Fn() + 'static) {
        self.submit_microtask(TaskCallback::new(move |_args| {
            f();
            Ok(())
        }));
    }

    fn submit_microtask(&self, callable: TaskCallback) {
        let id = self.allocate_id();
        let trigger = self.context.current_trigger();
        let snapshot = self.context.current();

        if let Some(observer) = &self.observer {
            observer.init(id, TaskKind::Microtask, trigger);
        }

        let observer = self.observer.clone();
        let context = self.context.clone();
        self.microtasks.enqueue_microtask(Box::new(move || {
            let _scope = context.enter(snapshot, id);
            if let Some(observer) = &observer {
                observer.before(id, trigger);
            }
            let result = callable.call(&[]);
            if let Some(observer) = &observer {
                observer.destroy(id);
            }
            if let Some(observer) = &observer {
                observer.after(id);
            }
            if let Err(failure) = result {
                error!(id = id.as_u64(), %failure, "microtask callback failed");
            }
        }));
        trace!(id = id.as_u64(), "microtask submitted");
    }

    // ========================================================================
    // Draining
    // ========================================================================

    /// Cheap once-per-host-iteration entry point.
    ///
    /// When nothing is deferred and no rejection warning is pending, a
    /// single external microtask drain happens and, if that changed
    /// nothing, the call returns without touching the record machinery.
    /// Otherwise it falls through to the full drain loop.
    pub fn run_if_needed(&self) -> SchedulerResult<()> {
        if !self.tick_scheduled.get() && !self.rejections.has_pending() {
            self.microtasks.run_microtasks();
            if !self.tick_scheduled.get() && !self.rejections.has_pending() {
                return Ok(());
            }
        }
        self.process_ticks_and_rejections()
    }

    /// Drain deferred callbacks and microtasks to a simultaneous fixpoint.
    ///
    /// The inner loop fully drains the tick queue — including records
    /// pushed by callbacks running inside this very loop — before each
    /// microtask pass, so a chain of self-rescheduling deferred callbacks
    /// runs to completion before any microtask proceeds. The outer loop
    /// repeats until the queue is empty and the engine reports no
    /// rejection left to warn about; only then are the pending and
    /// rejection-warn flags cleared.
    ///
    /// A failing callback aborts the pass: its destroy/after notifications
    /// fire and its frame is restored, then the error propagates without
    /// clearing either flag, leaving later records queued for a later
    /// pass.
    pub fn process_ticks_and_rejections(&self) -> SchedulerResult<()> {
        loop {
            loop {
                // The borrow must end before the callback runs: callbacks
                // may push.
                let task = self.queue.borrow_mut().pop();
                match task {
                    Some(task) => self.run_task(task)?,
                    None => break,
                }
            }
            self.microtasks.run_microtasks();
            if self.queue.borrow().is_empty() && !self.microtasks.process_rejections() {
                break;
            }
        }
        self.tick_scheduled.set(false);
        self.rejections.clear();
        trace!("tick queue drained to fixpoint");
        Ok(())
    }

    fn run_task(&self, task: TickTask) -> SchedulerResult<()> {
        let TickTask {
            id,
            trigger,
            snapshot,
            callback,
            args,
        } = task;

        let _scope = self.context.enter(snapshot, id);
        if let Some(observer) = &self.observer {
            observer.before(id, trigger);
        }
        let result = args.dispatch(&callback);
        self.processed.set(self.processed.get() + 1);
        self.pending_estimate.set(self.pending_estimate.get() - 1);
        if let Some(observer) = &self.observer {
            observer.destroy(id);
        }
        if let Some(observer) = &self.observer {
            observer.after(id);
        }
        result.map_err(|source| SchedulerError::CallbackFailure { id, source })
    }

    // ========================================================================
    // Host-facing state
    // ========================================================================

    /// Whether deferred work became pending since the last full drain
    pub fn has_tick_scheduled(&self) -> bool {
        self.tick_scheduled.get()
    }

    /// Whether an unhandled-rejection warning is pending
    pub fn has_rejection_to_warn(&self) -> bool {
        self.rejections.has_pending()
    }

    /// Hand out a signal handle for the external promise engine
    pub fn rejection_signal(&self) -> RejectionSignal {
        self.rejections.signal()
    }

    /// Begin the irreversible shutdown sequence.
    ///
    /// Deferred submissions from this point on are silently dropped;
    /// records already queued still run if the host drains again.
    pub fn begin_shutdown(&self) {
        if !self.exiting.replace(true) {
            debug!("scheduler shutdown began; further deferred submissions are dropped");
        }
    }

    /// Whether shutdown has begun
    pub fn is_shutting_down(&self) -> bool {
        self.exiting.get()
    }

    /// The currently active ambient frame
    pub fn current_frame(&self) -> ContextFrame {
        self.context.current()
    }

    /// Set a new ambient frame, returning the previous one.
    ///
    /// Hosts use the swap/restore pair when entering and leaving their own
    /// async scopes; the pair must nest strictly.
    pub fn swap_frame(&self, frame: ContextFrame) -> ContextFrame {
        self.context.exchange(frame)
    }

    /// Restore a previously swapped-out ambient frame
    pub fn restore_frame(&self, frame: ContextFrame) {
        self.context.set(frame);
    }

    /// Snapshot of the diagnostic counters
    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            scheduled: self.scheduled.get(),
            processed: self.processed.get(),
            pending_estimate: self.pending_estimate.get(),
        }
    }

    fn allocate_id(&self) -> TickId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        TickId::from_u64(id)
    }
}
