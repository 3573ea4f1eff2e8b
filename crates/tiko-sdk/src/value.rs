//! TaskValue — opaque dynamic value crossing the host boundary
//!
//! Hosts hand the scheduler callbacks and bound arguments as `TaskValue`s.
//! Primitive values are stored inline; strings and callables are
//! reference-counted so cloning a value never copies payload data. The
//! scheduler is single-threaded cooperative, so values use `Rc` and are
//! deliberately `!Send`.

use crate::error::CallbackResult;
use std::fmt;
use std::rc::Rc;

/// A callable unit of work.
///
/// Wraps a host function invoked with a slice of bound arguments. Cloning
/// is cheap (reference count bump); the same callable may back several
/// scheduled records.
#[derive(Clone)]
pub struct TaskCallback {
    func: Rc<dyn Fn(&[TaskValue]) -> CallbackResult>,
}

impl TaskCallback {
    /// Create a callback from a host function
    pub fn new(func: impl Fn(&[TaskValue]) -> CallbackResult + 'static) -> Self {
        Self {
            func: Rc::new(func),
        }
    }

    /// Invoke the callback with the given arguments
    pub fn call(&self, args: &[TaskValue]) -> CallbackResult {
        (self.func)(args)
    }

    /// Check whether two callbacks share the same underlying function
    pub fn same(&self, other: &TaskCallback) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for TaskCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TaskCallback")
    }
}

/// Opaque dynamic value handed across the host boundary.
///
/// The tagged-union equivalent of a host-language value: primitives are
/// stored inline, heap values are reference-counted. Equality is by value
/// for primitives and strings, by identity for callables.
#[derive(Debug, Clone)]
pub enum TaskValue {
    /// The null value
    Null,
    /// A boolean value
    Bool(bool),
    /// A 32-bit integer value
    I32(i32),
    /// A 64-bit float value
    F64(f64),
    /// An immutable string value
    Str(Rc<str>),
    /// A callable unit of work
    Callable(TaskCallback),
}

impl TaskValue {
    /// Create a null value
    pub fn null() -> Self {
        TaskValue::Null
    }

    /// Create a boolean value
    pub fn bool(b: bool) -> Self {
        TaskValue::Bool(b)
    }

    /// Create a 32-bit integer value
    pub fn i32(i: i32) -> Self {
        TaskValue::I32(i)
    }

    /// Create a 64-bit float value
    pub fn f64(f: f64) -> Self {
        TaskValue::F64(f)
    }

    /// Create a string value
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        TaskValue::Str(s.into())
    }

    /// Create a callable value from an existing callback
    pub fn callable(callback: TaskCallback) -> Self {
        TaskValue::Callable(callback)
    }

    /// Create a callable value directly from a host function
    pub fn callable_fn(func: impl Fn(&[TaskValue]) -> CallbackResult + 'static) -> Self {
        TaskValue::Callable(TaskCallback::new(func))
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, TaskValue::Null)
    }

    /// Check if the value is callable
    pub fn is_callable(&self) -> bool {
        matches!(self, TaskValue::Callable(_))
    }

    /// Get the boolean payload, if any
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TaskValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the i32 payload, if any
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            TaskValue::I32(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the f64 payload, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TaskValue::F64(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the string payload, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TaskValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the callable payload, if any
    pub fn as_callable(&self) -> Option<&TaskCallback> {
        match self {
            TaskValue::Callable(c) => Some(c),
            _ => None,
        }
    }

    /// Name of this value's type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            TaskValue::Null => "null",
            TaskValue::Bool(_) => "bool",
            TaskValue::I32(_) => "i32",
            TaskValue::F64(_) => "f64",
            TaskValue::Str(_) => "string",
            TaskValue::Callable(_) => "callable",
        }
    }
}

impl PartialEq for TaskValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TaskValue::Null, TaskValue::Null) => true,
            (TaskValue::Bool(a), TaskValue::Bool(b)) => a == b,
            (TaskValue::I32(a), TaskValue::I32(b)) => a == b,
            (TaskValue::F64(a), TaskValue::F64(b)) => a == b,
            (TaskValue::Str(a), TaskValue::Str(b)) => a == b,
            (TaskValue::Callable(a), TaskValue::Callable(b)) => a.same(b),
            _ => false,
        }
    }
}
