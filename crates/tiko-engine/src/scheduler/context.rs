//! Ambient-context frame propagation
//!
//! At any instant there is exactly one current frame. Submission captures
//! it; the drain loop swaps the captured frame in around the callback and
//! restores the caller's frame afterward, strict stack discipline even on
//! early return. The store also tracks the currently executing task id,
//! which becomes the trigger for anything scheduled from inside a running
//! callback.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tiko_sdk::TickId;

/// An opaque, cheaply cloneable ambient-context value.
///
/// The root frame carries nothing; hosts attach an arbitrary payload with
/// [`ContextFrame::new`] and read it back with [`ContextFrame::get`].
/// Cloning shares the payload. Equality is identity of the payload.
#[derive(Clone, Default)]
pub struct ContextFrame {
    slot: Option<Rc<dyn Any>>,
}

impl ContextFrame {
    /// The empty root frame
    pub const fn root() -> Self {
        Self { slot: None }
    }

    /// Create a frame carrying a host payload
    pub fn new<T: 'static>(payload: T) -> Self {
        Self {
            slot: Some(Rc::new(payload)),
        }
    }

    /// Check whether this is the empty root frame
    pub fn is_root(&self) -> bool {
        self.slot.is_none()
    }

    /// Borrow the payload, if it has the requested type
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.slot.as_ref()?.downcast_ref()
    }
}

impl PartialEq for ContextFrame {
    fn eq(&self, other: &Self) -> bool {
        match (&self.slot, &other.slot) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for ContextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("ContextFrame::root")
        } else {
            f.write_str("ContextFrame")
        }
    }
}

struct StoreInner {
    frame: RefCell<ContextFrame>,
    executing: Cell<TickId>,
}

/// Holder of the single current [`ContextFrame`].
///
/// A cloneable handle over shared state: the scheduler and the microtask
/// wrappers it hands out all swap through the same store. Single-threaded,
/// so no locking — only correct save/restore ordering.
#[derive(Clone)]
pub struct ContextStore {
    inner: Rc<StoreInner>,
}

impl ContextStore {
    /// Create a store with the root frame current and no executing task
    pub fn new() -> Self {
        Self {
            inner: Rc::new(StoreInner {
                frame: RefCell::new(ContextFrame::root()),
                executing: Cell::new(TickId::ROOT),
            }),
        }
    }

    /// The currently active frame
    pub fn current(&self) -> ContextFrame {
        self.inner.frame.borrow().clone()
    }

    /// Set a new current frame, returning the previous one
    pub fn exchange(&self, frame: ContextFrame) -> ContextFrame {
        self.inner.frame.replace(frame)
    }

    /// Set the current frame
    pub fn set(&self, frame: ContextFrame) {
        *self.inner.frame.borrow_mut() = frame;
    }

    /// Id of the currently executing unit of work, or the root id.
    ///
    /// This is the trigger recorded on anything scheduled right now.
    pub fn current_trigger(&self) -> TickId {
        self.inner.executing.get()
    }

    /// Swap in `frame` and mark `id` as executing until the guard drops.
    ///
    /// Restoration happens on drop, so the caller's frame and trigger come
    /// back even when the scope is left through an error path.
    pub fn enter(&self, frame: ContextFrame, id: TickId) -> ContextScope {
        let prior_frame = self.exchange(frame);
        let prior_id = self.inner.executing.replace(id);
        ContextScope {
            store: self.clone(),
            prior_frame: Some(prior_frame),
            prior_id,
        }
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard restoring the prior frame and executing id on drop
pub struct ContextScope {
    store: ContextStore,
    prior_frame: Option<ContextFrame>,
    prior_id: TickId,
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        if let Some(prior) = self.prior_frame.take() {
            self.store.set(prior);
        }
        self.store.inner.executing.set(self.prior_id);
    }
}
