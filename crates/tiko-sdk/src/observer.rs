//! TaskObserver trait — lifecycle notification surface
//!
//! An external tracing collaborator receives init/before/after/destroy
//! notifications around each scheduled unit of work. Installation is
//! optional: when no observer is installed the engine skips every
//! notification site outright instead of calling into a no-op.

use crate::types::{TaskKind, TickId};

/// Trait for observing the lifecycle of scheduled work.
///
/// All methods default to doing nothing so implementors can override only
/// the notifications they care about. Notifications arrive on the single
/// scheduler thread, in a strict per-record order: `init` at submission,
/// then `before`, `destroy`, `after` around execution.
pub trait TaskObserver {
    /// A unit of work was created.
    ///
    /// - `id`: the new record's id
    /// - `kind`: deferred tick or direct microtask
    /// - `trigger`: id of the causally-preceding unit of work
    fn init(&self, id: TickId, kind: TaskKind, trigger: TickId) {
        let _ = (id, kind, trigger);
    }

    /// A unit of work is about to run
    fn before(&self, id: TickId, trigger: TickId) {
        let _ = (id, trigger);
    }

    /// A unit of work finished running (fires even when the callback failed)
    fn after(&self, id: TickId) {
        let _ = id;
    }

    /// A unit of work will never run again (fires even when the callback failed)
    fn destroy(&self, id: TickId) {
        let _ = id;
    }
}

/// An observer that ignores every notification.
///
/// Useful as a base for hosts that want a named type to extend, or to
/// measure the observed-path overhead against the uninstalled fast path.
pub struct NoopObserver;

impl TaskObserver for NoopObserver {}
