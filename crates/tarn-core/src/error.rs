//! Error types for buffer allocation and access.
//!
//! There are two distinct reporting channels and they must never be
//! conflated:
//!
//! 1. **Hard failures** — the [`BufferError`] variants below, returned
//!    as `Err` from construction, growth, and writes. Never retried
//!    internally.
//! 2. **Soft end-of-data** — bounds-checked reads that run past the end
//!    return `false`/`None` without mutating anything. This is the
//!    normal way to detect end-of-buffer during sequential consumption
//!    and is not an error.

use std::error::Error;
use std::fmt;

/// Hard failures from buffer construction, growth, and writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// The allocator returned null for an allocation request.
    ///
    /// Raised at construction and during growth. Carries the identity
    /// of the allocator that refused the request.
    AllocationFailed {
        /// Number of bytes requested from the allocator.
        requested: usize,
        /// Type name of the allocator that returned null.
        allocator: &'static str,
    },
    /// A write ran past the end of the buffer with growth disabled.
    CapacityExceeded {
        /// End offset the write would have needed (`offset + len`).
        requested: usize,
        /// Capacity of the buffer at the time of the write.
        capacity: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed {
                requested,
                allocator,
            } => {
                write!(
                    f,
                    "allocator '{allocator}' failed to allocate {requested} bytes"
                )
            }
            Self::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "capacity exceeded: write needs {requested} bytes, capacity {capacity} bytes, growth disabled"
                )
            }
        }
    }
}

impl Error for BufferError {}
