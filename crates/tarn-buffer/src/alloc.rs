//! The allocator capability: raw allocate/release primitives.
//!
//! A [`RawAllocator`] supplies the two primitives a buffer needs and
//! nothing else. It is stateless (associated functions, no receiver),
//! so implementations are either pure wrappers over a platform
//! allocator or internally synchronized.
//!
//! Returning null from [`RawAllocator::allocate`] is not itself an
//! error at this layer — the buffer maps null to
//! [`BufferError::AllocationFailed`](tarn_core::BufferError) with the
//! allocator's identity attached.

use std::alloc::Layout;

/// Raw allocate/release primitives for buffer storage.
///
/// Implementations must satisfy the usual allocator contract: a
/// non-null pointer returned by `allocate(size)` refers to `size`
/// bytes of writable memory, valid until passed to `release` with the
/// same size. `allocate` reports failure by returning null, never by
/// panicking.
pub trait RawAllocator {
    /// Allocate `size` bytes. Returns null on failure or for `size == 0`.
    fn allocate(size: usize) -> *mut u8;

    /// Release a block previously returned by [`RawAllocator::allocate`].
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `Self::allocate(size)` with the
    /// same `size`, must not have been released before, and must not be
    /// accessed afterwards.
    unsafe fn release(ptr: *mut u8, size: usize);

    /// Identity of this allocator, used in error reports.
    fn name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}

/// Default allocator: a thin wrapper over the platform heap.
///
/// Blocks are byte-aligned (`align = 1`); the buffer layer never needs
/// stronger alignment because all typed access goes through unaligned
/// load/store primitives.
pub struct HeapAllocator;

impl RawAllocator for HeapAllocator {
    fn allocate(size: usize) -> *mut u8 {
        // A zero-size layout is legal but `alloc` on it is not; report
        // it as an allocation failure instead.
        if size == 0 {
            return std::ptr::null_mut();
        }
        let Ok(layout) = Layout::from_size_align(size, 1) else {
            return std::ptr::null_mut();
        };
        // SAFETY: layout has non-zero size (checked above).
        unsafe { std::alloc::alloc(layout) }
    }

    unsafe fn release(ptr: *mut u8, size: usize) {
        debug_assert!(!ptr.is_null());
        debug_assert!(size > 0);
        let Ok(layout) = Layout::from_size_align(size, 1) else {
            return;
        };
        // SAFETY: caller guarantees `ptr` came from `allocate(size)`,
        // which used this exact layout.
        unsafe { std::alloc::dealloc(ptr, layout) }
    }

    fn name() -> &'static str {
        "HeapAllocator"
    }
}
