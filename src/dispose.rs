//! The disposal capability and the predicate that recognises it.
//!
//! Anything that can release a side effect implements [`Dispose`]. Containers
//! store members as [`DisposableRef`] handles and compare them by reference
//! identity, so the same instance may be registered in several containers (or
//! several times in one) without the containers knowing about each other.
//!
//! # Examples
//!
//! ```
//! use std::rc::Rc;
//! use disposables::{is_disposable, Disposable, DisposableRef};
//!
//! let handle: DisposableRef = Rc::new(Disposable::noop());
//! assert!(is_disposable(&handle));
//! assert!(is_disposable(&Disposable::noop()));
//!
//! assert!(!is_disposable(&42));
//! assert!(!is_disposable(&"dispose"));
//! ```

use std::any::Any;
use std::rc::Rc;

use crate::{CompositeDisposable, Disposable, SerialDisposable};

/// A value owning a releasable side effect.
///
/// `dispose` takes `&self`: release actions are allowed to call back into the
/// container that is releasing them, so all state transitions happen through
/// interior mutability.
///
/// Implementations should make `dispose` idempotent. Containers never call it
/// more than once per registration, but the same instance can be registered
/// more than once.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use disposables::Dispose;
///
/// struct Timer {
///     cancelled: Cell<bool>,
/// }
///
/// impl Dispose for Timer {
///     fn dispose(&self) {
///         self.cancelled.set(true);
///     }
/// }
///
/// let timer = Timer { cancelled: Cell::new(false) };
/// timer.dispose();
/// assert!(timer.cancelled.get());
/// ```
pub trait Dispose {
    /// Release the underlying side effect.
    fn dispose(&self);
}

/// Shared handle to any disposable, as stored by the containers.
pub type DisposableRef = Rc<dyn Dispose>;

impl<T: Dispose + ?Sized> Dispose for Rc<T> {
    fn dispose(&self) {
        (**self).dispose()
    }
}

impl<T: Dispose + ?Sized> Dispose for Box<T> {
    fn dispose(&self) {
        (**self).dispose()
    }
}

/// Returns true if both handles point at the same disposable instance.
///
/// Only the data pointer is compared, so the same value reached through
/// different trait-object vtables still counts as one instance.
pub fn same_disposable<A: ?Sized, B: ?Sized>(a: &Rc<A>, b: &Rc<B>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Check whether a dynamically typed value carries the disposal capability.
///
/// Recognised values are the crate's own disposables (by value or behind an
/// `Rc`) and anything already erased to a [`DisposableRef`]. Rust cannot ask
/// at runtime whether an arbitrary type implements a trait, so caller-defined
/// disposables must be erased to `DisposableRef` to be recognised here.
///
/// Plain closures, numbers, strings, `Option`s and sequences are not
/// disposables, even when they are callable.
///
/// Pass the value itself rather than an `Rc<dyn Any>` wrapping it: use
/// `is_disposable(&*value)`.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use disposables::{is_disposable, CompositeDisposable, DisposableRef, SerialDisposable};
///
/// assert!(is_disposable(&CompositeDisposable::new()));
/// assert!(is_disposable(&Rc::new(SerialDisposable::new())));
///
/// let callback = || {};
/// assert!(!is_disposable(&callback));
/// assert!(!is_disposable(&None::<DisposableRef>));
/// ```
pub fn is_disposable(value: &dyn Any) -> bool {
    value.is::<Disposable>()
        || value.is::<CompositeDisposable>()
        || value.is::<SerialDisposable>()
        || value.is::<Rc<Disposable>>()
        || value.is::<Rc<CompositeDisposable>>()
        || value.is::<Rc<SerialDisposable>>()
        || value.is::<DisposableRef>()
}

/// Convert a dynamically typed value into a [`DisposableRef`].
///
/// Accepts exactly the values [`is_disposable`] recognises. On failure the
/// original value is handed back untouched.
///
/// Values stored directly in the `Rc` keep their identity: the returned handle
/// points at the same allocation. Values that were already handles are cloned.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use std::rc::Rc;
/// use disposables::{into_disposable, Disposable};
///
/// let value: Rc<dyn Any> = Rc::new(Disposable::noop());
/// assert!(into_disposable(value).is_ok());
///
/// let value: Rc<dyn Any> = Rc::new("not a disposable");
/// assert!(into_disposable(value).is_err());
/// ```
pub fn into_disposable(value: Rc<dyn Any>) -> Result<DisposableRef, Rc<dyn Any>> {
    let value = match value.downcast::<Disposable>() {
        Ok(d) => return Ok(d as DisposableRef),
        Err(v) => v,
    };
    let value = match value.downcast::<CompositeDisposable>() {
        Ok(d) => return Ok(d as DisposableRef),
        Err(v) => v,
    };
    let value = match value.downcast::<SerialDisposable>() {
        Ok(d) => return Ok(d as DisposableRef),
        Err(v) => v,
    };

    if let Some(d) = value.downcast_ref::<DisposableRef>() {
        return Ok(Rc::clone(d));
    }
    if let Some(d) = value.downcast_ref::<Rc<Disposable>>() {
        return Ok(Rc::clone(d) as DisposableRef);
    }
    if let Some(d) = value.downcast_ref::<Rc<CompositeDisposable>>() {
        return Ok(Rc::clone(d) as DisposableRef);
    }
    if let Some(d) = value.downcast_ref::<Rc<SerialDisposable>>() {
        return Ok(Rc::clone(d) as DisposableRef);
    }

    Err(value)
}

// Sequence shapes a caller may hand to a variadic-looking entry point.
pub(crate) fn is_sequence(value: &dyn Any) -> bool {
    value.is::<Vec<DisposableRef>>()
        || value.is::<Vec<Rc<dyn Any>>>()
        || value.is::<Vec<Rc<Disposable>>>()
}
