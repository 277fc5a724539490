//! # Disposables
//!
//! A small algebra of disposable resources for Rust.
//!
//! A disposable owns a releasable side effect (a subscription, a timer, a
//! handle) and exposes one idempotent release operation. This crate makes
//! cleanup composable:
//! - [`Disposable`] wraps a release action and runs it at most once
//! - [`CompositeDisposable`] releases a whole group, and keeps accepting
//!   (and immediately releasing) members after it is gone
//! - [`SerialDisposable`] holds one occupant and releases it on replacement
//!
//! Any type implementing [`Dispose`] can join a container, including the
//! containers themselves.
//!
//! ## Quick Example
//!
//! ```rust
//! use std::rc::Rc;
//! use disposables::prelude::*;
//!
//! let group = CompositeDisposable::new();
//! let timer = Rc::new(SerialDisposable::new());
//! group.add(timer.clone());
//!
//! let first = Rc::new(Disposable::new(|| println!("first timer cancelled")));
//! timer.set_disposable(Some(first.clone()));
//! timer.set_disposable(Some(Rc::new(Disposable::noop())));
//! assert!(first.is_disposed());
//!
//! group.dispose();
//! assert!(timer.is_disposed());
//! ```
//!
//! ## Threading
//!
//! Everything here is single-threaded (`Rc`, `Cell`, `RefCell`). Release
//! actions may call back into the container that is releasing them; the
//! containers order their state transitions so that such reentrant calls
//! observe the post-transition state.
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events on container state transitions

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod composite;
pub mod disposable;
pub mod dispose;
pub mod error;
pub mod guard;
pub mod serial;
pub mod testing;

// Re-exports
pub use composite::CompositeDisposable;
pub use disposable::Disposable;
pub use dispose::{into_disposable, is_disposable, same_disposable, DisposableRef, Dispose};
pub use error::DisposeError;
pub use guard::DisposeGuard;
pub use serial::SerialDisposable;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::composite;
    pub use crate::composite::CompositeDisposable;
    pub use crate::disposable::Disposable;
    pub use crate::dispose::{is_disposable, DisposableRef, Dispose};
    pub use crate::error::DisposeError;
    pub use crate::guard::DisposeGuard;
    pub use crate::serial::SerialDisposable;
}
