use std::fmt;

/// Errors returned by [`List`](crate::List) operations.
///
/// Every error is reported before the list is touched, so a failed call
/// leaves the list exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListError {
    /// A required input was absent.
    NullInput,
    /// The node does not belong to this list.
    Ownership,
    /// The node already belongs to a list and must be removed first.
    AlreadyInList,
    /// A positional lookup outside `0..count`.
    IndexOutOfRange { index: usize, count: usize },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::NullInput => write!(f, "required input is absent"),
            ListError::Ownership => write!(f, "node does not belong to this list"),
            ListError::AlreadyInList => write!(f, "node already belongs to a list"),
            ListError::IndexOutOfRange { index, count } => {
                write!(f, "index {} out of range for list of length {}", index, count)
            }
        }
    }
}

impl std::error::Error for ListError {}

pub type Result<T> = std::result::Result<T, ListError>;
