//! The shared buffer handle and its allocation record.
//!
//! A [`Buffer`] is one *handle* onto a reference-counted allocation
//! record. The record (pointer, capacity, ref count) is shared by every
//! clone and guarded by a single mutex; the cursor and the
//! [`BufferOptions`] policy are per-handle and unsynchronized.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::sync::{Arc, Mutex, MutexGuard};

use tarn_core::{scalar, BufferError, Scalar};

use crate::alloc::{HeapAllocator, RawAllocator};
use crate::config::BufferOptions;
use crate::raw;
use crate::stream::Stream;

/// Shared state of one allocation, guarded by the record's mutex.
struct BlockState {
    /// Start of the raw storage block. Contents are defined for
    /// `[0, capacity)`. Swapped in place by growth.
    ptr: NonNull<u8>,
    /// Total usable byte size of the current block.
    capacity: usize,
    /// Number of live handles referencing this record.
    ref_count: usize,
    /// Set once the storage has been given back to the allocator.
    released: bool,
}

/// The allocation record: one per storage block, shared by all handles.
pub(crate) struct SharedBlock {
    state: Mutex<BlockState>,
}

// SAFETY: the raw storage is only read or written while holding the
// `state` mutex, and the pointer value itself carries no thread
// affinity. Handles on other threads therefore never observe a
// half-swapped pointer/capacity pair.
unsafe impl Send for SharedBlock {}
unsafe impl Sync for SharedBlock {}

impl SharedBlock {
    fn lock(&self) -> MutexGuard<'_, BlockState> {
        // The critical sections below never panic, so poisoning can
        // only come from a panicking caller elsewhere; recover the
        // guard rather than propagating the poison.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A shared-ownership, growable raw memory buffer.
///
/// Construction allocates and zero-fills one block through the
/// allocator `A`. Cloning is a *reference copy*: the clone shares the
/// same storage, capacity, and reference count, but carries its own
/// cursor (starting at the cloned handle's position) and its own copy
/// of the policy options. The block is freed exactly once, by the last
/// handle to drop — provided that handle still has `auto_release` set;
/// otherwise the block is intentionally leaked.
///
/// Offset-based reads and writes ([`Buffer::read_at`],
/// [`Buffer::write_at`]) and growth are serialized by the record's
/// mutex and safe to call from threads sharing clones. The cursor
/// forms take `&mut self` and are single-threaded per handle.
pub struct Buffer<A: RawAllocator = HeapAllocator> {
    shared: Arc<SharedBlock>,
    /// Read/write offset for the cursor-based operations. Per-handle.
    cursor: usize,
    /// Per-handle policy; never propagated to siblings.
    options: BufferOptions,
    _alloc: PhantomData<fn() -> A>,
}

impl<A: RawAllocator> Buffer<A> {
    /// Allocate a zero-filled buffer of `capacity` bytes with default
    /// options.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] if the allocator
    /// returns null.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero — a zero-capacity buffer has no
    /// defined storage and is rejected outright.
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        Self::with_options(capacity, BufferOptions::default())
    }

    /// Allocate a zero-filled buffer with explicit policy options.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] if the allocator
    /// returns null.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_options(capacity: usize, options: BufferOptions) -> Result<Self, BufferError> {
        assert!(capacity > 0, "buffer capacity must be non-zero");
        let Some(ptr) = NonNull::new(A::allocate(capacity)) else {
            return Err(BufferError::AllocationFailed {
                requested: capacity,
                allocator: A::name(),
            });
        };
        // SAFETY: `ptr` refers to `capacity` writable bytes, per the
        // allocator contract.
        unsafe { raw::zero_fill(ptr.as_ptr(), capacity) };
        Ok(Self {
            shared: Arc::new(SharedBlock {
                state: Mutex::new(BlockState {
                    ptr,
                    capacity,
                    ref_count: 1,
                    released: false,
                }),
            }),
            cursor: 0,
            options,
            _alloc: PhantomData,
        })
    }

    /// Bounds-checked read of `dst.len()` bytes starting at `offset`.
    ///
    /// Returns `false` (soft end-of-data) without mutating anything if
    /// the range runs past the current capacity. Never allocates or
    /// grows.
    pub fn read_at(&self, dst: &mut [u8], offset: usize) -> bool {
        let state = self.shared.lock();
        let Some(end) = offset.checked_add(dst.len()) else {
            return false;
        };
        if end > state.capacity {
            return false;
        }
        // SAFETY: `offset + dst.len() <= capacity` was just checked,
        // the storage is live while any handle exists, and the guard
        // is held so growth cannot swap the pointer under us. `dst` is
        // a distinct borrow, so the regions are disjoint.
        unsafe { raw::copy(state.ptr.as_ptr().add(offset), dst.as_mut_ptr(), dst.len()) };
        true
    }

    /// Cursor-form read: [`Buffer::read_at`] at the current cursor.
    ///
    /// The cursor advances by `dst.len()` whether or not the read
    /// succeeded (advance-then-report). After a `false` return the
    /// cursor and the bytes actually consumed are out of sync; callers
    /// that care should [`Buffer::set_position`] explicitly.
    pub fn read(&mut self, dst: &mut [u8]) -> bool {
        let ok = self.read_at(dst, self.cursor);
        self.cursor = self.cursor.saturating_add(dst.len());
        ok
    }

    /// Write `src` starting at `offset`, growing if permitted.
    ///
    /// If the range runs past the current capacity and this handle has
    /// `auto_expand` set, the storage grows by `expand_increment` steps
    /// until the write fits, then proceeds. With growth disabled (or a
    /// zero increment) the write fails with
    /// [`BufferError::CapacityExceeded`] and mutates nothing.
    ///
    /// # Errors
    ///
    /// [`BufferError::CapacityExceeded`] as above, or
    /// [`BufferError::AllocationFailed`] if growth hits a null return
    /// from the allocator.
    pub fn write_at(&self, src: &[u8], offset: usize) -> Result<(), BufferError> {
        let mut state = self.shared.lock();
        let end = offset.saturating_add(src.len());
        while end > state.capacity {
            if !self.options.auto_expand || self.options.expand_increment == 0 {
                return Err(BufferError::CapacityExceeded {
                    requested: end,
                    capacity: state.capacity,
                });
            }
            Self::grow(&mut state, self.options.expand_increment)?;
        }
        // SAFETY: the loop above established `end <= capacity`; the
        // guard is held, and `src` is a distinct borrow.
        unsafe { raw::copy(src.as_ptr(), state.ptr.as_ptr().add(offset), src.len()) };
        Ok(())
    }

    /// Cursor-form write: [`Buffer::write_at`] at the current cursor.
    ///
    /// The cursor advances by `src.len()` on success only; a failed
    /// write leaves both the storage and the cursor untouched.
    pub fn write(&mut self, src: &[u8]) -> Result<(), BufferError> {
        self.write_at(src, self.cursor)?;
        self.cursor = self.cursor.saturating_add(src.len());
        Ok(())
    }

    /// Read one scalar at the cursor, host byte order.
    ///
    /// Cursor semantics match [`Buffer::read`]: the cursor advances by
    /// `T::WIDTH` even when the read fails (`None`).
    pub fn read_scalar<T: Scalar>(&mut self) -> Option<T> {
        let mut scratch = [0u8; scalar::MAX_WIDTH];
        let ok = self.read_at(&mut scratch[..T::WIDTH], self.cursor);
        self.cursor = self.cursor.saturating_add(T::WIDTH);
        ok.then(|| T::load_ne(&scratch[..T::WIDTH]))
    }

    /// Write one scalar at the cursor, host byte order.
    ///
    /// Cursor semantics match [`Buffer::write`]: advances on success
    /// only. Growth policy applies as for [`Buffer::write_at`].
    ///
    /// # Errors
    ///
    /// Propagates the [`Buffer::write_at`] failures.
    pub fn write_scalar<T: Scalar>(&mut self, value: T) -> Result<(), BufferError> {
        let mut scratch = [0u8; scalar::MAX_WIDTH];
        value.store_ne(&mut scratch[..T::WIDTH]);
        self.write_at(&scratch[..T::WIDTH], self.cursor)?;
        self.cursor = self.cursor.saturating_add(T::WIDTH);
        Ok(())
    }

    /// Grow the storage by one `expand_increment` step.
    ///
    /// Returns `Ok(false)` without touching the storage if either
    /// `auto_release` or `auto_expand` is disabled on *this* handle
    /// (both are required, matching the write-path policy only in the
    /// `auto_expand` half — see the crate docs on per-handle policy).
    ///
    /// On `Ok(true)` the capacity grew by exactly `expand_increment`,
    /// the previous contents are byte-identical, and the new tail is
    /// zero-filled. The new pointer and capacity are published under
    /// the guard, so siblings never observe a half-swapped pair.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailed`] if the allocator returns null
    /// for the larger block; the original storage is left intact.
    pub fn expand(&self) -> Result<bool, BufferError> {
        if !(self.options.auto_release && self.options.auto_expand) {
            return Ok(false);
        }
        let mut state = self.shared.lock();
        Self::grow(&mut state, self.options.expand_increment)?;
        Ok(true)
    }

    /// Reallocate to `capacity + increment`, preserving contents and
    /// zero-filling the tail. Caller holds the guard.
    fn grow(state: &mut BlockState, increment: usize) -> Result<(), BufferError> {
        let new_capacity = state.capacity.saturating_add(increment);
        let Some(new_ptr) = NonNull::new(A::allocate(new_capacity)) else {
            return Err(BufferError::AllocationFailed {
                requested: new_capacity,
                allocator: A::name(),
            });
        };
        // SAFETY: the new block has `new_capacity` writable bytes; the
        // old block is live and at least `capacity` bytes; the two
        // blocks are distinct allocations. The old block is released
        // exactly once, here, and the pointer swap happens under the
        // guard held by the caller.
        unsafe {
            raw::zero_fill(new_ptr.as_ptr(), new_capacity);
            raw::copy(state.ptr.as_ptr(), new_ptr.as_ptr(), state.capacity);
            A::release(state.ptr.as_ptr(), state.capacity);
        }
        state.ptr = new_ptr;
        state.capacity = new_capacity;
        Ok(())
    }

    /// Current capacity in bytes (guarded snapshot; growth on another
    /// handle can change it between calls).
    pub fn capacity(&self) -> usize {
        self.shared.lock().capacity
    }

    /// Memory usage of the storage block in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.capacity()
    }

    /// Number of live handles sharing this allocation.
    pub fn ref_count(&self) -> usize {
        self.shared.lock().ref_count
    }

    /// This handle's cursor position in bytes.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Move this handle's cursor to `position`.
    pub fn set_position(&mut self, position: usize) {
        self.cursor = position;
    }

    /// Reset this handle's cursor to zero.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Bytes added per growth step on this handle.
    pub fn expand_increment(&self) -> usize {
        self.options.expand_increment
    }

    /// Set this handle's growth step. Siblings are unaffected.
    pub fn set_expand_increment(&mut self, increment: usize) {
        self.options.expand_increment = increment;
    }

    /// Whether overflowing writes grow the storage on this handle.
    pub fn auto_expand(&self) -> bool {
        self.options.auto_expand
    }

    /// Enable or disable growth on this handle. Siblings are unaffected.
    pub fn set_auto_expand(&mut self, enabled: bool) {
        self.options.auto_expand = enabled;
    }

    /// Whether this handle frees the storage if it is the last to drop.
    pub fn auto_release(&self) -> bool {
        self.options.auto_release
    }

    /// Enable or disable release-on-last-drop on this handle.
    pub fn set_auto_release(&mut self, enabled: bool) {
        self.options.auto_release = enabled;
    }

    /// Open a typed stream over this buffer.
    ///
    /// The stream wraps a fresh reference (clone) of the buffer, so it
    /// keeps the allocation alive independently of this handle. Its
    /// element cursor starts at zero and is independent of the
    /// buffer's own cursor.
    pub fn stream<T: Scalar>(&self) -> Stream<T, A> {
        Stream::new(self.clone())
    }

    /// Stream of raw bytes (`u8`, width 1).
    pub fn byte_stream(&self) -> Stream<u8, A> {
        self.stream()
    }

    /// Stream of narrow characters (`i8`, width 1).
    pub fn char_stream(&self) -> Stream<i8, A> {
        self.stream()
    }

    /// Stream of UTF-8 code units (`u8`, width 1).
    pub fn utf8_stream(&self) -> Stream<u8, A> {
        self.stream()
    }

    /// Stream of UTF-16 code units (`u16`, width 2).
    pub fn utf16_stream(&self) -> Stream<u16, A> {
        self.stream()
    }

    /// Stream of UTF-32 code units (`u32`, width 4).
    pub fn utf32_stream(&self) -> Stream<u32, A> {
        self.stream()
    }

    /// Guarded snapshot of the storage pointer and capacity, for the
    /// stream's raw escape hatch.
    pub(crate) fn storage_snapshot(&self) -> (NonNull<u8>, usize) {
        let state = self.shared.lock();
        (state.ptr, state.capacity)
    }
}

impl<A: RawAllocator> Clone for Buffer<A> {
    /// Reference copy — the only sanctioned way to create a second
    /// owner of the allocation.
    ///
    /// Increments the shared reference count under the guard. The new
    /// handle starts at this handle's cursor position and carries an
    /// independent copy of the policy options.
    fn clone(&self) -> Self {
        self.shared.lock().ref_count += 1;
        Self {
            shared: Arc::clone(&self.shared),
            cursor: self.cursor,
            options: self.options,
            _alloc: PhantomData,
        }
    }
}

impl<A: RawAllocator> Drop for Buffer<A> {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.ref_count -= 1;
        if state.ref_count == 0 && self.options.auto_release && !state.released {
            // SAFETY: this was the last handle, so nothing can touch
            // the storage after this point; the block came from
            // `A::allocate` with this exact size. `released` guards
            // against any second release.
            unsafe { A::release(state.ptr.as_ptr(), state.capacity) };
            state.released = true;
        }
        // The record struct itself (mutex included) is freed by `Arc`
        // when the last clone of `shared` goes away.
    }
}

impl<A: RawAllocator> fmt::Debug for Buffer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("Buffer")
            .field("capacity", &state.capacity)
            .field("ref_count", &state.ref_count)
            .field("cursor", &self.cursor)
            .field("options", &self.options)
            .finish()
    }
}
