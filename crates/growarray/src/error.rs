//! Array-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during array operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// The global allocator could not satisfy a reallocation request.
    ///
    /// The array is left exactly as it was before the failing call.
    AllocationFailed {
        /// Size of the block that was requested, in bytes.
        requested_bytes: usize,
    },
    /// The requested slot count cannot be represented as a valid layout
    /// (overflows `usize` or exceeds `isize::MAX` bytes).
    CapacityOverflow {
        /// Number of slots requested.
        requested: usize,
    },
    /// Growth would exceed the configured `max_capacity`.
    CapacityExceeded {
        /// Number of slots the growth policy asked for.
        requested: usize,
        /// Configured ceiling.
        max: usize,
    },
    /// Checked access outside `[0, len)`.
    OutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of live elements at the time of access.
        len: usize,
    },
}

impl ArrayError {
    /// Returns `true` for the errors that come from reserving storage
    /// (as opposed to indexing).
    pub fn is_allocation_error(&self) -> bool {
        !matches!(self, Self::OutOfBounds { .. })
    }
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested_bytes } => {
                write!(f, "allocation failed: requested {requested_bytes} bytes")
            }
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} slots cannot be laid out")
            }
            Self::CapacityExceeded { requested, max } => {
                write!(
                    f,
                    "capacity exceeded: requested {requested} slots, maximum {max}"
                )
            }
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
        }
    }
}

impl Error for ArrayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_out_of_bounds() {
        let err = ArrayError::OutOfBounds { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 out of bounds for length 3");
    }

    #[test]
    fn display_capacity_exceeded() {
        let err = ArrayError::CapacityExceeded {
            requested: 16,
            max: 8,
        };
        assert_eq!(
            err.to_string(),
            "capacity exceeded: requested 16 slots, maximum 8"
        );
    }

    #[test]
    fn allocation_classification() {
        assert!(ArrayError::AllocationFailed { requested_bytes: 64 }.is_allocation_error());
        assert!(ArrayError::CapacityOverflow { requested: 1 }.is_allocation_error());
        assert!(!ArrayError::OutOfBounds { index: 0, len: 0 }.is_allocation_error());
    }

    #[test]
    fn usable_as_boxed_error() {
        let boxed: Box<dyn Error> = Box::new(ArrayError::CapacityOverflow { requested: 3 });
        assert!(boxed.source().is_none());
        assert!(boxed.to_string().contains("3 slots"));
    }
}
