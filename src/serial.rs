//! A single-slot container that releases its previous occupant on replacement.
//!
//! # Examples
//!
//! ```
//! use std::rc::Rc;
//! use disposables::{Dispose, Disposable, SerialDisposable};
//!
//! let first = Rc::new(Disposable::noop());
//! let second = Rc::new(Disposable::noop());
//!
//! let slot = SerialDisposable::new();
//! slot.set_disposable(Some(first.clone()));
//! slot.set_disposable(Some(second.clone()));
//!
//! assert!(first.is_disposed());
//! assert!(!second.is_disposed());
//!
//! slot.dispose();
//! assert!(second.is_disposed());
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dispose::{into_disposable, DisposableRef, Dispose};
use crate::error::DisposeError;

/// A slot holding at most one live disposable.
///
/// Assigning a new occupant disposes the previous one. The swap happens
/// before the previous occupant is released, so a release action that reads
/// the slot sees the new occupant. Once the container itself is disposed the
/// slot stays empty and every later assignment is released on arrival.
pub struct SerialDisposable {
    current: RefCell<Option<DisposableRef>>,
    disposed: Cell<bool>,
}

impl SerialDisposable {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            current: RefCell::new(None),
            disposed: Cell::new(false),
        }
    }

    /// Current occupant, if any.
    pub fn get_disposable(&self) -> Option<DisposableRef> {
        self.current.borrow().clone()
    }

    /// Replace the occupant, disposing the previous one.
    ///
    /// `None` clears the slot. If this container is already disposed the slot
    /// is left empty and `value` is disposed immediately.
    pub fn set_disposable(&self, value: Option<DisposableRef>) {
        if self.disposed.get() {
            if let Some(value) = value {
                #[cfg(feature = "tracing")]
                tracing::debug!("SerialDisposable already disposed, releasing assigned value");
                value.dispose();
            }
            return;
        }

        let previous = self.current.replace(value);
        if let Some(previous) = previous {
            #[cfg(feature = "tracing")]
            tracing::trace!("SerialDisposable releasing previous occupant");
            previous.dispose();
        }
    }

    /// Replace the occupant with a dynamically typed value.
    ///
    /// The value is checked with [`is_disposable`](crate::is_disposable)
    /// before the slot is touched; a non-disposable value leaves the
    /// container unchanged and returns [`DisposeError::NotDisposable`].
    ///
    /// # Example
    ///
    /// ```
    /// use std::any::Any;
    /// use std::rc::Rc;
    /// use disposables::{Disposable, DisposeError, SerialDisposable};
    ///
    /// let slot = SerialDisposable::new();
    /// let ok: Rc<dyn Any> = Rc::new(Disposable::noop());
    /// assert!(slot.try_set_value(Some(ok)).is_ok());
    ///
    /// let bad: Rc<dyn Any> = Rc::new(42);
    /// assert_eq!(slot.try_set_value(Some(bad)), Err(DisposeError::not_disposable()));
    /// assert!(slot.get_disposable().is_some());
    /// ```
    pub fn try_set_value(&self, value: Option<Rc<dyn Any>>) -> Result<(), DisposeError> {
        let value = value
            .map(|v| into_disposable(v).map_err(|_| DisposeError::not_disposable()))
            .transpose()?;
        self.set_disposable(value);
        Ok(())
    }

    /// Dispose the current occupant and empty the slot.
    pub fn clear(&self) {
        self.set_disposable(None);
    }

    /// Returns true once the container has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

impl Dispose for SerialDisposable {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        let previous = self.current.take();
        if let Some(previous) = previous {
            previous.dispose();
        }
    }
}

impl Default for SerialDisposable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SerialDisposable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialDisposable")
            .field("occupied", &self.current.borrow().is_some())
            .field("is_disposed", &self.disposed.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispose::same_disposable;
    use crate::testing::DisposeCounter;
    use crate::Disposable;

    fn occupant_is<D: ?Sized>(serial: &SerialDisposable, expected: &Rc<D>) -> bool {
        serial
            .get_disposable()
            .is_some_and(|current| same_disposable(&current, expected))
    }

    #[test]
    fn rejects_bad_values() {
        let serial = SerialDisposable::new();
        let bad: Vec<Rc<dyn Any>> = vec![
            Rc::new(42_i32) as Rc<dyn Any>,
            Rc::new(()) as Rc<dyn Any>,
            Rc::new(0_u8) as Rc<dyn Any>,
            Rc::new("") as Rc<dyn Any>,
        ];
        for value in bad {
            assert_eq!(
                serial.try_set_value(Some(value)),
                Err(DisposeError::not_disposable())
            );
        }
        assert!(serial.get_disposable().is_none());
    }

    #[test]
    fn bad_value_leaves_occupant_untouched() {
        let counter = DisposeCounter::new();
        let a = counter.disposable("a");
        let serial = SerialDisposable::new();
        serial.set_disposable(Some(a.clone()));

        assert!(serial.try_set_value(Some(Rc::new(42_i32) as Rc<dyn Any>)).is_err());
        assert!(occupant_is(&serial, &a));
        assert!(!a.is_disposed());
    }

    #[test]
    fn gets_and_sets_current() {
        let counter = DisposeCounter::new();
        let a = counter.disposable("a");
        let serial = SerialDisposable::new();

        assert!(serial.get_disposable().is_none());
        serial.set_disposable(Some(a.clone()));
        assert!(occupant_is(&serial, &a));
        serial.set_disposable(None);
        assert!(serial.get_disposable().is_none());
        serial.clear();
        assert!(serial.get_disposable().is_none());
        serial.set_disposable(Some(a.clone()));
        assert!(occupant_is(&serial, &a));
    }

    #[test]
    fn try_set_value_accepts_none_and_disposables() {
        let serial = SerialDisposable::new();
        let value: Rc<dyn Any> = Rc::new(Disposable::noop());
        assert!(serial.try_set_value(Some(value.clone())).is_ok());
        assert!(occupant_is(&serial, &value));
        assert!(serial.try_set_value(None).is_ok());
        assert!(serial.get_disposable().is_none());
    }

    #[test]
    fn disposes_current_on_own_dispose() {
        let counter = DisposeCounter::new();
        let a = counter.disposable("a");
        let serial = SerialDisposable::new();
        serial.set_disposable(Some(a.clone()));

        assert!(!a.is_disposed());
        serial.dispose();
        assert!(a.is_disposed());
        assert!(serial.is_disposed());
        assert!(serial.get_disposable().is_none());
    }

    #[test]
    fn disposes_assignments_after_own_dispose() {
        let counter = DisposeCounter::new();
        let a = counter.disposable("a");
        let b = counter.disposable("b");
        let serial = SerialDisposable::new();
        serial.dispose();

        serial.set_disposable(Some(a.clone()));
        assert!(a.is_disposed());
        serial.set_disposable(None);
        serial.set_disposable(Some(b.clone()));
        assert!(b.is_disposed());
        assert!(serial.get_disposable().is_none());
    }

    #[test]
    fn disposes_previous_occupant() {
        let counter = DisposeCounter::new();
        let a = counter.disposable("a");
        let b = counter.disposable("b");
        let c = counter.disposable("c");
        let serial = SerialDisposable::new();

        serial.set_disposable(Some(a.clone()));
        assert!(!a.is_disposed());
        serial.set_disposable(Some(b.clone()));
        assert!(a.is_disposed());
        assert!(!b.is_disposed());
        serial.set_disposable(None);
        assert!(b.is_disposed());
        serial.set_disposable(Some(c.clone()));
        assert!(!c.is_disposed());
        serial.set_disposable(None);
        assert!(c.is_disposed());
    }

    #[test]
    fn does_not_dispose_child_twice() {
        let counter = DisposeCounter::new();
        let a = counter.probe("a");
        let serial = SerialDisposable::new();
        serial.set_disposable(Some(a.clone()));

        serial.dispose();
        serial.dispose();
        assert_eq!(counter.count_of("a"), 1);
    }

    #[test]
    fn release_action_observes_new_occupant() {
        let serial = Rc::new(SerialDisposable::new());
        let seen_new = Rc::new(Cell::new(false));
        let replacement = Rc::new(Disposable::noop());

        let outgoing = {
            let serial = Rc::downgrade(&serial);
            let replacement = replacement.clone();
            let seen_new = seen_new.clone();
            Rc::new(Disposable::new(move || {
                if let Some(serial) = serial.upgrade() {
                    seen_new.set(occupant_is(&serial, &replacement));
                }
            }))
        };

        serial.set_disposable(Some(outgoing));
        serial.set_disposable(Some(replacement.clone()));
        assert!(seen_new.get());
    }

    #[test]
    fn reentrant_assignment_from_release_action() {
        let counter = DisposeCounter::new();
        let serial = Rc::new(SerialDisposable::new());
        let follow_up = counter.disposable("follow-up");

        let outgoing = {
            let serial = Rc::downgrade(&serial);
            let follow_up = follow_up.clone();
            Rc::new(Disposable::new(move || {
                if let Some(serial) = serial.upgrade() {
                    serial.set_disposable(Some(follow_up));
                }
            }))
        };

        serial.set_disposable(Some(outgoing));
        serial.dispose();

        // Assignment during the container's own disposal is released on arrival
        assert!(follow_up.is_disposed());
        assert!(serial.get_disposable().is_none());
    }

    #[test]
    fn debug_impl() {
        let serial = SerialDisposable::new();
        let debug_str = format!("{:?}", serial);
        assert!(debug_str.contains("SerialDisposable"));
        assert!(debug_str.contains("occupied: false"));
    }
}
