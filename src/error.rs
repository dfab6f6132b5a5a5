use std::collections::TryReserveError;
use std::fmt;

/// Allocation failure while creating or growing a table, or copying a key.
///
/// A failed operation leaves the table as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The requested slot count does not fit in `usize`.
    CapacityOverflow,
    /// The allocator refused the request, or its byte size overflowed
    /// `isize` inside `try_reserve` (std does not expose which on stable).
    OutOfMemory(TryReserveError),
}

impl From<TryReserveError> for AllocError {
    fn from(e: TryReserveError) -> Self {
        AllocError::OutOfMemory(e)
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::CapacityOverflow => f.write_str("table capacity overflow"),
            AllocError::OutOfMemory(e) => write!(f, "table allocation failed: {}", e),
        }
    }
}

impl std::error::Error for AllocError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AllocError::CapacityOverflow => None,
            AllocError::OutOfMemory(e) => Some(e),
        }
    }
}
