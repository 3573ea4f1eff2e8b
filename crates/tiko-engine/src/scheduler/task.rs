//! Tick task record and argument binding

use crate::scheduler::context::ContextFrame;
use tiko_sdk::{CallbackResult, TaskCallback, TaskValue, TickId};

/// Bound arguments for a scheduled callback.
///
/// A tagged union of fixed-arity forms: the common 0–4 argument cases
/// carry their values inline and never touch the heap; five or more fall
/// back to an ordered sequence. Which form is used is invisible to the
/// callback — only argument order is contractual.
#[derive(Debug, Clone)]
pub enum CallArgs {
    /// Zero-argument invocation
    None,
    /// One bound argument
    One(TaskValue),
    /// Two bound arguments
    Two(TaskValue, TaskValue),
    /// Three bound arguments
    Three(TaskValue, TaskValue, TaskValue),
    /// Four bound arguments
    Four(TaskValue, TaskValue, TaskValue, TaskValue),
    /// Five or more bound arguments
    Spread(Vec<TaskValue>),
}

impl CallArgs {
    /// Bind a slice of arguments, picking the fixed-arity form when it fits
    pub fn from_slice(args: &[TaskValue]) -> Self {
        match args {
            [] => CallArgs::None,
            [a] => CallArgs::One(a.clone()),
            [a, b] => CallArgs::Two(a.clone(), b.clone()),
            [a, b, c] => CallArgs::Three(a.clone(), b.clone(), c.clone()),
            [a, b, c, d] => CallArgs::Four(a.clone(), b.clone(), c.clone(), d.clone()),
            _ => CallArgs::Spread(args.to_vec()),
        }
    }

    /// Number of bound arguments
    pub fn len(&self) -> usize {
        match self {
            CallArgs::None => 0,
            CallArgs::One(..) => 1,
            CallArgs::Two(..) => 2,
            CallArgs::Three(..) => 3,
            CallArgs::Four(..) => 4,
            CallArgs::Spread(args) => args.len(),
        }
    }

    /// Check whether no arguments are bound
    pub fn is_empty(&self) -> bool {
        matches!(self, CallArgs::None)
    }

    /// Invoke `callback` with these arguments, dispatching by arity
    pub(crate) fn dispatch(self, callback: &TaskCallback) -> CallbackResult {
        match self {
            CallArgs::None => callback.call(&[]),
            CallArgs::One(a) => callback.call(&[a]),
            CallArgs::Two(a, b) => callback.call(&[a, b]),
            CallArgs::Three(a, b, c) => callback.call(&[a, b, c]),
            CallArgs::Four(a, b, c, d) => callback.call(&[a, b, c, d]),
            CallArgs::Spread(args) => callback.call(&args),
        }
    }
}

/// A deferred-callback record.
///
/// Created at submission, owned by the tick queue until popped, then
/// consumed exactly once by the drain loop. Immutable after creation; no
/// back-reference is retained once it has run.
#[derive(Debug)]
pub struct TickTask {
    /// Unique id assigned at submission
    pub(crate) id: TickId,
    /// Id of the causally-preceding unit of work
    pub(crate) trigger: TickId,
    /// Ambient context captured at submission time
    pub(crate) snapshot: ContextFrame,
    /// The unit of work
    pub(crate) callback: TaskCallback,
    /// Bound arguments
    pub(crate) args: CallArgs,
}

impl TickTask {
    pub(crate) fn new(
        id: TickId,
        trigger: TickId,
        snapshot: ContextFrame,
        callback: TaskCallback,
        args: CallArgs,
    ) -> Self {
        Self {
            id,
            trigger,
            snapshot,
            callback,
            args,
        }
    }

    /// Id assigned at submission
    pub fn id(&self) -> TickId {
        self.id
    }

    /// Id of the causally-preceding unit of work
    pub fn trigger(&self) -> TickId {
        self.trigger
    }

    /// Number of bound arguments
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}
