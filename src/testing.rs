//! Testing utilities for code that manages disposables
//!
//! This module provides a recorder for release actions and assertion macros
//! for disposal state.
//!
//! # Examples
//!
//! ## DisposeCounter
//!
//! ```rust
//! use disposables::testing::DisposeCounter;
//! use disposables::{composite, Dispose};
//!
//! let counter = DisposeCounter::new();
//! let group = composite![counter.disposable("db"), counter.disposable("socket")];
//!
//! group.dispose();
//! assert_eq!(counter.order(), vec!["db", "socket"]);
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use disposables::{assert_disposed, assert_not_disposed, Dispose, Disposable};
//!
//! let d = Disposable::noop();
//! assert_not_disposed!(d);
//! d.dispose();
//! assert_disposed!(d);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::dispose::Dispose;
use crate::Disposable;

/// Shared log of release actions.
///
/// `DisposeCounter` mints labelled disposables whose release actions append
/// their label to a shared log. Clones share the same log, so the counter can
/// be moved into closures while the test keeps a handle.
///
/// # Example
///
/// ```rust
/// use disposables::testing::DisposeCounter;
/// use disposables::Dispose;
///
/// let counter = DisposeCounter::new();
/// let a = counter.disposable("a");
/// a.dispose();
/// a.dispose();
///
/// assert_eq!(counter.count(), 1);
/// assert_eq!(counter.count_of("a"), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DisposeCounter {
    log: Rc<RefCell<Vec<String>>>,
}

impl DisposeCounter {
    /// Create a counter with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`Disposable`] that records `label` when released.
    pub fn disposable(&self, label: impl Into<String>) -> Rc<Disposable> {
        let log = Rc::clone(&self.log);
        let label = label.into();
        Rc::new(Disposable::new(move || log.borrow_mut().push(label)))
    }

    /// Create a [`Probe`] that records `label` on every `dispose` call.
    ///
    /// Unlike [`disposable`](Self::disposable), a probe is not idempotent, so
    /// it reveals how many times a container released it.
    pub fn probe(&self, label: impl Into<String>) -> Rc<Probe> {
        Rc::new(Probe {
            log: Rc::clone(&self.log),
            label: label.into(),
        })
    }

    /// Total number of recorded releases.
    pub fn count(&self) -> usize {
        self.log.borrow().len()
    }

    /// Number of recorded releases for `label`.
    pub fn count_of(&self, label: &str) -> usize {
        self.log.borrow().iter().filter(|l| *l == label).count()
    }

    /// Labels in the order they were released.
    pub fn order(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

/// Caller-defined disposable that records every `dispose` call.
#[derive(Debug)]
pub struct Probe {
    log: Rc<RefCell<Vec<String>>>,
    label: String,
}

impl Probe {
    /// The label this probe records.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Dispose for Probe {
    fn dispose(&self) {
        self.log.borrow_mut().push(self.label.clone());
    }
}

/// Assert that a value has been disposed.
///
/// Works with anything exposing `is_disposed()`.
///
/// # Example
///
/// ```rust
/// use disposables::{assert_disposed, Dispose, SerialDisposable};
///
/// let serial = SerialDisposable::new();
/// serial.dispose();
/// assert_disposed!(serial);
/// ```
#[macro_export]
macro_rules! assert_disposed {
    ($value:expr) => {
        if !$value.is_disposed() {
            panic!("Expected disposed, got live: {}", stringify!($value));
        }
    };
}

/// Assert that a value has not been disposed.
///
/// # Example
///
/// ```rust
/// use disposables::{assert_not_disposed, CompositeDisposable};
///
/// let group = CompositeDisposable::new();
/// assert_not_disposed!(group);
/// ```
#[macro_export]
macro_rules! assert_not_disposed {
    ($value:expr) => {
        if $value.is_disposed() {
            panic!("Expected live, got disposed: {}", stringify!($value));
        }
    };
}
