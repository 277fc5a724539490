//! A group of disposables released together.
//!
//! `CompositeDisposable` holds members in insertion order. Members can be
//! added and removed while the group is live; disposing the group releases
//! every member once and turns the group into a sink that releases anything
//! added later on arrival.
//!
//! # Examples
//!
//! ```
//! use std::rc::Rc;
//! use disposables::{composite, Dispose, Disposable};
//!
//! let a = Rc::new(Disposable::noop());
//! let b = Rc::new(Disposable::noop());
//!
//! let group = composite![a.clone(), b.clone()];
//! group.dispose();
//!
//! assert!(a.is_disposed());
//! assert!(b.is_disposed());
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dispose::{into_disposable, is_sequence, same_disposable, DisposableRef, Dispose};
use crate::error::DisposeError;

/// A group of disposables that are disposed together.
///
/// Membership is tracked by reference identity. Adding the same handle twice
/// creates two independent slots, and each successful [`remove`] releases one
/// of them.
///
/// # Reentrancy
///
/// [`dispose`] marks the group disposed and detaches the member list before
/// releasing any member. A member whose release action calls back into the
/// group therefore sees it as already disposed: `add` releases the new item
/// at once and `remove` returns false.
///
/// [`remove`]: CompositeDisposable::remove
/// [`dispose`]: Dispose::dispose
pub struct CompositeDisposable {
    disposables: RefCell<Vec<DisposableRef>>,
    disposed: Cell<bool>,
}

impl CompositeDisposable {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a group from a sequence of disposables, keeping their order.
    ///
    /// # Example
    ///
    /// ```
    /// use std::rc::Rc;
    /// use disposables::{CompositeDisposable, Disposable, DisposableRef};
    ///
    /// let members: Vec<DisposableRef> = vec![
    ///     Rc::new(Disposable::noop()),
    ///     Rc::new(Disposable::noop()),
    /// ];
    /// let group = CompositeDisposable::from_vec(members);
    /// assert_eq!(group.len(), 2);
    /// ```
    pub fn from_vec(disposables: Vec<DisposableRef>) -> Self {
        Self {
            disposables: RefCell::new(disposables),
            disposed: Cell::new(false),
        }
    }

    /// Create a group from dynamically typed values.
    ///
    /// Every value is checked with [`is_disposable`](crate::is_disposable)
    /// before anything is stored. A sequence among the values is rejected as
    /// [`DisposeError::MixedArguments`]; pass sequences through
    /// [`from_vec`](Self::from_vec) instead. Any other non-disposable value is
    /// rejected as [`DisposeError::NotDisposable`].
    ///
    /// # Example
    ///
    /// ```
    /// use std::any::Any;
    /// use std::rc::Rc;
    /// use disposables::{CompositeDisposable, Disposable, DisposableRef, DisposeError};
    ///
    /// let a: Rc<dyn Any> = Rc::new(Disposable::noop());
    /// let group = CompositeDisposable::try_from_values(vec![a.clone()]).unwrap();
    /// assert_eq!(group.len(), 1);
    ///
    /// let seq: Vec<DisposableRef> = vec![Rc::new(Disposable::noop())];
    /// let seq: Rc<dyn Any> = Rc::new(seq);
    /// let mixed = CompositeDisposable::try_from_values(vec![seq, a]);
    /// assert_eq!(mixed.err(), Some(DisposeError::MixedArguments { index: 0 }));
    /// ```
    pub fn try_from_values(values: Vec<Rc<dyn Any>>) -> Result<Self, DisposeError> {
        let count = values.len();
        let disposables = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                into_disposable(value).map_err(|rejected| {
                    if count > 1 && is_sequence(&*rejected) {
                        DisposeError::MixedArguments { index }
                    } else {
                        DisposeError::not_disposable_at(index)
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_vec(disposables))
    }

    /// Add a disposable to the group.
    ///
    /// If the group is already disposed, `item` is disposed immediately and
    /// not stored.
    pub fn add(&self, item: DisposableRef) {
        if self.disposed.get() {
            #[cfg(feature = "tracing")]
            tracing::debug!("CompositeDisposable already disposed, releasing added item");
            item.dispose();
            return;
        }
        self.disposables.borrow_mut().push(item);
    }

    /// Remove and dispose the first occurrence of `item`.
    ///
    /// Returns true if `item` was a member. Returns false if it was not, or
    /// if the group is already disposed.
    ///
    /// # Example
    ///
    /// ```
    /// use std::rc::Rc;
    /// use disposables::{CompositeDisposable, Disposable};
    ///
    /// let a = Rc::new(Disposable::noop());
    /// let group = CompositeDisposable::new();
    /// group.add(a.clone());
    /// group.add(a.clone());
    ///
    /// assert!(group.remove(&a));
    /// assert!(a.is_disposed());
    /// assert!(group.remove(&a));
    /// assert!(!group.remove(&a));
    /// ```
    pub fn remove<D: ?Sized>(&self, item: &Rc<D>) -> bool {
        if self.disposed.get() {
            return false;
        }

        let removed = {
            let mut disposables = self.disposables.borrow_mut();
            match disposables.iter().position(|d| same_disposable(d, item)) {
                Some(index) => disposables.remove(index),
                None => return false,
            }
        };

        #[cfg(feature = "tracing")]
        tracing::trace!("CompositeDisposable removed member");
        removed.dispose();
        true
    }

    /// Returns true if `item` is currently a member.
    pub fn contains<D: ?Sized>(&self, item: &Rc<D>) -> bool {
        self.disposables
            .borrow()
            .iter()
            .any(|d| same_disposable(d, item))
    }

    /// Number of member slots currently held.
    pub fn len(&self) -> usize {
        self.disposables.borrow().len()
    }

    /// Returns true if the group holds no members.
    pub fn is_empty(&self) -> bool {
        self.disposables.borrow().is_empty()
    }

    /// Returns true once the group has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

impl Dispose for CompositeDisposable {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        // Detach before releasing so reentrant calls see an empty, disposed group
        let snapshot = self.disposables.take();

        #[cfg(feature = "tracing")]
        tracing::debug!(members = snapshot.len(), "CompositeDisposable disposing");

        for disposable in &snapshot {
            disposable.dispose();
        }
    }
}

impl Default for CompositeDisposable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<DisposableRef> for CompositeDisposable {
    fn from_iter<I: IntoIterator<Item = DisposableRef>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl std::fmt::Debug for CompositeDisposable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeDisposable")
            .field("len", &self.len())
            .field("is_disposed", &self.disposed.get())
            .finish()
    }
}

/// Build a [`CompositeDisposable`] from a list of disposables.
///
/// Each item may be any `Rc` of a disposable type; it is coerced to a
/// [`DisposableRef`](crate::DisposableRef).
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use disposables::{composite, Disposable, SerialDisposable};
///
/// let group = composite![Rc::new(Disposable::noop()), Rc::new(SerialDisposable::new())];
/// assert_eq!(group.len(), 2);
///
/// let empty = composite![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! composite {
    () => {
        $crate::CompositeDisposable::new()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::CompositeDisposable::from_vec(::std::vec![
            $({
                let item: $crate::DisposableRef = $item;
                item
            }),+
        ])
    };
}
