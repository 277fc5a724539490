//! Error types for disposable construction and assignment.

/// Error returned when a value handed to a container does not carry the
/// disposal capability.
///
/// Both variants are invalid-argument errors: they are raised before the
/// container is mutated, so a failed call leaves no partial state behind.
///
/// # Examples
///
/// ```rust
/// use std::any::Any;
/// use std::rc::Rc;
/// use disposables::{CompositeDisposable, DisposeError};
///
/// let values: Vec<Rc<dyn Any>> = vec![Rc::new(42) as Rc<dyn Any>];
/// match CompositeDisposable::try_from_values(values) {
///     Err(DisposeError::NotDisposable { index }) => assert_eq!(index, Some(0)),
///     _ => panic!("Expected NotDisposable"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisposeError {
    /// The value does not expose a dispose operation.
    NotDisposable {
        /// Position of the offending value, when it came from a list.
        index: Option<usize>,
    },
    /// A sequence was passed alongside sibling values.
    MixedArguments {
        /// Position of the sequence within the argument list.
        index: usize,
    },
}

impl DisposeError {
    /// Create a `NotDisposable` error for a value at `index`.
    pub fn not_disposable_at(index: usize) -> Self {
        Self::NotDisposable { index: Some(index) }
    }

    /// Create a `NotDisposable` error for a single value.
    pub fn not_disposable() -> Self {
        Self::NotDisposable { index: None }
    }

    /// Returns true if this is a `MixedArguments` error.
    pub fn is_mixed(&self) -> bool {
        matches!(self, Self::MixedArguments { .. })
    }

    /// Position of the offending argument, if known.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::NotDisposable { index } => *index,
            Self::MixedArguments { index } => Some(*index),
        }
    }
}

impl std::fmt::Display for DisposeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotDisposable { index: Some(i) } => {
                write!(f, "expected a disposable at argument {}", i)
            }
            Self::NotDisposable { index: None } => {
                write!(f, "expected either an empty value or a valid disposable")
            }
            Self::MixedArguments { index } => write!(
                f,
                "a sequence of disposables at argument {} cannot be mixed with other arguments",
                index
            ),
        }
    }
}

impl std::error::Error for DisposeError {}
