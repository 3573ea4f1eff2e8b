//! Tiko SDK - Lightweight SDK for hosts embedding the tick scheduler
//!
//! This crate provides the minimal types and traits a host needs to
//! collaborate with the tiko engine without depending on it:
//! - **Values**: the opaque [`TaskValue`] handed across the host boundary,
//!   including the callable variant (`value` module)
//! - **Collaborators**: the [`MicrotaskEngine`] capability consumed by the
//!   drain loop, and the [`TaskObserver`] notification surface
//!   (`microtask` and `observer` modules)
//! - **Identifiers**: [`TickId`] and [`TaskKind`] (`types` module)
//! - **Errors**: [`CallbackError`] returned by failing callbacks (`error`
//!   module)
//!
//! # Example
//!
//! ```rust,ignore
//! use tiko_sdk::{MicrotaskEngine, TaskObserver, TickId, TaskKind};
//!
//! struct HostEngine { /* promise machinery */ }
//!
//! impl MicrotaskEngine for HostEngine {
//!     fn run_microtasks(&self) { /* drain the promise queue */ }
//!     fn enqueue_microtask(&self, microtask: Box<dyn FnOnce()>) { /* ... */ }
//!     fn process_rejections(&self) -> bool { /* warn and clear */ false }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod error;
mod microtask;
mod observer;
mod types;
mod value;

pub use error::{CallbackError, CallbackResult};
pub use microtask::{MicrotaskEngine, SimpleMicrotaskQueue};
pub use observer::{NoopObserver, TaskObserver};
pub use types::{TaskKind, TickId};
pub use value::{TaskCallback, TaskValue};
