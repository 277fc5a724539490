//! Scope guard that disposes its value when dropped.
//!
//! Containers and leaves never dispose themselves on drop: an un-disposed
//! subscription that goes out of scope simply stays subscribed. Wrap a value
//! in [`DisposeGuard`] to tie its release to a lexical scope instead.

use std::ops::Deref;

use crate::dispose::Dispose;

/// Disposes the wrapped value when the guard goes out of scope.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use disposables::{Disposable, DisposeGuard};
///
/// let subscription = Rc::new(Disposable::noop());
/// {
///     let _guard = DisposeGuard::new(subscription.clone());
/// }
/// assert!(subscription.is_disposed());
/// ```
pub struct DisposeGuard<D: Dispose> {
    inner: D,
    armed: bool,
}

impl<D: Dispose> DisposeGuard<D> {
    /// Guard `inner`, disposing it on drop.
    pub fn new(inner: D) -> Self {
        Self { inner, armed: true }
    }

    /// Stop the guard from disposing on drop.
    ///
    /// # Example
    ///
    /// ```
    /// use std::rc::Rc;
    /// use disposables::{Disposable, DisposeGuard};
    ///
    /// let subscription = Rc::new(Disposable::noop());
    /// {
    ///     let mut guard = DisposeGuard::new(subscription.clone());
    ///     guard.disarm();
    /// }
    /// assert!(!subscription.is_disposed());
    /// ```
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Returns true if the guard will dispose on drop.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Get a reference to the guarded value.
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: Dispose> Deref for DisposeGuard<D> {
    type Target = D;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<D: Dispose> Drop for DisposeGuard<D> {
    fn drop(&mut self) {
        if self.armed {
            self.inner.dispose();
        }
    }
}

impl<D: Dispose> std::fmt::Debug for DisposeGuard<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisposeGuard")
            .field("inner", &std::any::type_name::<D>())
            .field("armed", &self.armed)
            .finish()
    }
}
