//! Low-level primitives for raw buffer memory operations.
//!
//! All unsafe pointer manipulation in this crate funnels through these
//! helpers so the proof obligations live in one place. Each function is
//! a thin wrapper with the caller contract spelled out.

#![allow(unsafe_code)]

/// Zero-fill `len` bytes starting at `ptr`.
///
/// # Safety
///
/// `ptr` must be valid for writes of `len` bytes.
pub(crate) unsafe fn zero_fill(ptr: *mut u8, len: usize) {
    // SAFETY: caller guarantees ptr..ptr+len is writable.
    unsafe { ptr.write_bytes(0, len) }
}

/// Copy `len` bytes from `src` to `dst`. The regions must not overlap.
///
/// # Safety
///
/// `src` must be valid for reads of `len` bytes, `dst` valid for writes
/// of `len` bytes, and the two regions must be disjoint.
pub(crate) unsafe fn copy(src: *const u8, dst: *mut u8, len: usize) {
    // SAFETY: caller guarantees validity and disjointness.
    unsafe { std::ptr::copy_nonoverlapping(src, dst, len) }
}
