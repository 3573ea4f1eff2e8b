//! Unhandled-rejection bookkeeping
//!
//! The external promise engine decides which promises are unhandled; this
//! component owns only the warn flag. The flag is set through a cloneable
//! [`RejectionSignal`] handle and cleared only when a drain pass completes
//! with nothing left to warn about — while set, it forces the drain loop
//! to keep going even with an empty tick queue.

use std::cell::Cell;
use std::rc::Rc;

/// Cloneable handle the promise engine uses to flag a new unhandled
/// rejection.
#[derive(Clone)]
pub struct RejectionSignal {
    flag: Rc<Cell<bool>>,
}

impl RejectionSignal {
    /// Record that a rejection newly lacks a handler
    pub fn mark_unhandled(&self) {
        self.flag.set(true);
    }

    /// Check whether a warning is pending
    pub fn is_pending(&self) -> bool {
        self.flag.get()
    }
}

/// Scheduler-side owner of the rejection-warn flag
pub struct RejectionTracker {
    flag: Rc<Cell<bool>>,
}

impl RejectionTracker {
    /// Create a tracker with no pending warning
    pub fn new() -> Self {
        Self {
            flag: Rc::new(Cell::new(false)),
        }
    }

    /// Hand out a signal handle for the promise engine
    pub fn signal(&self) -> RejectionSignal {
        RejectionSignal {
            flag: self.flag.clone(),
        }
    }

    /// Check whether a warning is pending
    pub fn has_pending(&self) -> bool {
        self.flag.get()
    }

    /// Clear the flag; called only at the end of a full drain
    pub(crate) fn clear(&self) {
        self.flag.set(false);
    }
}

impl Default for RejectionTracker {
    fn default() -> Self {
        Self::new()
    }
}
