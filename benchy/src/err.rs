//! Error types for the `benchy` crate

use std::alloc::Layout;

/// Errors reported by the containers in this crate
///
/// A missing map key is not an error; lookups report it as `None`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A bounds-checked access used an index at or past the live length.
    #[error("index {index} is out of range for a vector of length {len}")]
    OutOfRange {
        /// The index that was requested
        index: usize,
        /// The number of live elements at the time of the access
        len: usize,
    },

    /// The requested capacity does not fit in the address space.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The global allocator could not provide storage.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    Allocation {
        /// Layout of the allocation that failed
        layout: Layout,
    },

    /// A map capacity must be a nonzero power of two.
    #[error("map capacity {0} is not a nonzero power of two")]
    InvalidCapacity(usize),
}

/// Unwrap the result of a growth operation the way `std` collections do.
///
/// Allocator failure aborts through [`std::alloc::handle_alloc_error`]; any
/// other error means the requested size can't exist and is a panic.
pub(crate) fn infallible<T>(result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(Error::Allocation { layout }) => std::alloc::handle_alloc_error(layout),
        Err(err) => panic!("{}", err),
    }
}
