//! The leaf disposable: a release action run at most once.
//!
//! # Examples
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use disposables::{Dispose, Disposable};
//!
//! let released = Rc::new(Cell::new(0));
//! let counter = released.clone();
//! let subscription = Disposable::new(move || counter.set(counter.get() + 1));
//!
//! subscription.dispose();
//! subscription.dispose();
//! assert_eq!(released.get(), 1);
//! assert!(subscription.is_disposed());
//! ```

use std::cell::Cell;
use std::rc::Rc;

use crate::dispose::{DisposableRef, Dispose};

type Action = Box<dyn FnOnce()>;

/// A disposable wrapping a zero-argument release action.
///
/// The action is a plain closure with no receiver: it cannot observe the
/// `Disposable` that owns it.
///
/// # Release ordering
///
/// `dispose` takes the action out of its slot, runs it, and only then marks
/// the disposable as disposed. A reentrant `dispose` triggered from inside the
/// action still sees `is_disposed() == false`, but finds the slot empty and
/// returns without doing anything, so the action never runs twice.
pub struct Disposable {
    action: Cell<Option<Action>>,
    disposed: Cell<bool>,
}

impl Disposable {
    /// Create a disposable that runs `action` on first disposal.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            action: Cell::new(Some(Box::new(action))),
            disposed: Cell::new(false),
        }
    }

    /// Create a disposable whose action does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Shared no-op disposable.
    ///
    /// Every call on the same thread returns a handle to the same instance.
    /// Disposing it any number of times has no effect, so it can stand in
    /// wherever a disposable is required but nothing needs releasing.
    ///
    /// # Example
    ///
    /// ```
    /// use disposables::{same_disposable, Dispose, Disposable};
    ///
    /// let empty = Disposable::empty();
    /// empty.dispose();
    /// empty.dispose();
    /// assert!(same_disposable(&empty, &Disposable::empty()));
    /// ```
    pub fn empty() -> DisposableRef {
        EMPTY.with(Rc::clone)
    }

    /// Returns true once the action has run to completion.
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

impl Dispose for Disposable {
    fn dispose(&self) {
        if self.disposed.get() {
            return;
        }
        // Empty slot while not disposed: the action is running further up the stack
        let Some(action) = self.action.take() else {
            return;
        };

        action();
        self.disposed.set(true);

        #[cfg(feature = "tracing")]
        tracing::trace!("Disposable released");
    }
}

impl Default for Disposable {
    fn default() -> Self {
        Self::noop()
    }
}

impl std::fmt::Debug for Disposable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposable")
            .field("action", &"<action>")
            .field("is_disposed", &self.disposed.get())
            .finish()
    }
}

struct Empty;

impl Dispose for Empty {
    fn dispose(&self) {}
}

thread_local! {
    static EMPTY: DisposableRef = Rc::new(Empty);
}
