//! Typed cursor streams over a shared buffer.
//!
//! A [`Stream`] reinterprets a buffer's raw bytes as a sequence of
//! fixed-width [`Scalar`] elements and tracks its own element cursor.
//! It operates purely through the buffer's offset-based primitives —
//! the buffer handle's own byte cursor is never touched.

use std::marker::PhantomData;

use tarn_core::{BufferError, Scalar};

use crate::alloc::{HeapAllocator, RawAllocator};
use crate::buffer::Buffer;

/// A typed cursor view over one buffer handle.
///
/// The stream owns its buffer handle (a reference copy made at
/// construction), so it keeps the allocation alive independently of
/// the handle it was derived from. The element cursor and the cached
/// EOF flag are unsynchronized per-stream state; see the crate docs
/// for the concurrency contract.
///
/// The EOF flag is a derived predicate — `cursor * WIDTH >= capacity`
/// — recomputed on every cursor mutation, so moving forward and
/// backward report it consistently. A [`Stream::back`] that lands
/// exactly at capacity still reports EOF, because the predicate holds
/// there.
pub struct Stream<T: Scalar, A: RawAllocator = HeapAllocator> {
    buffer: Buffer<A>,
    /// Element-indexed cursor; byte offset is `pos * T::WIDTH`.
    pos: usize,
    /// Cached EOF predicate, refreshed on every cursor mutation.
    eof: bool,
    _elem: PhantomData<T>,
}

impl<T: Scalar, A: RawAllocator> Stream<T, A> {
    /// Wrap a buffer handle in a typed stream starting at element zero.
    ///
    /// Callers usually go through the factory methods on
    /// [`Buffer`](Buffer::stream), which clone the handle first.
    pub fn new(buffer: Buffer<A>) -> Self {
        let mut stream = Self {
            buffer,
            pos: 0,
            eof: false,
            _elem: PhantomData,
        };
        stream.refresh_eof();
        stream
    }

    /// Read the element at the cursor and advance by one.
    ///
    /// Returns `None` (soft end-of-data) without moving the cursor if
    /// the element would run past the capacity.
    pub fn get(&mut self) -> Option<T> {
        let mut scratch = [0u8; tarn_core::MAX_WIDTH];
        let offset = self.pos.saturating_mul(T::WIDTH);
        let ok = self.buffer.read_at(&mut scratch[..T::WIDTH], offset);
        if ok {
            self.pos += 1;
        }
        self.refresh_eof();
        ok.then(|| T::load_ne(&scratch[..T::WIDTH]))
    }

    /// Read the element at the cursor without net cursor movement.
    pub fn peek(&mut self) -> Option<T> {
        let saved = self.pos;
        let value = self.get();
        self.pos = saved;
        self.refresh_eof();
        value
    }

    /// Read the element `lookahead` positions ahead of the cursor
    /// (1 = the element `get` would return) without net cursor
    /// movement.
    ///
    /// # Panics
    ///
    /// Panics if `lookahead` is zero.
    pub fn peek_ahead(&mut self, lookahead: usize) -> Option<T> {
        assert!(lookahead > 0, "lookahead must be at least 1");
        let saved = self.pos;
        self.pos = self.pos.saturating_add(lookahead - 1);
        let value = self.get();
        self.pos = saved;
        self.refresh_eof();
        value
    }

    /// Write one element at the cursor and advance by one.
    ///
    /// The write goes through the buffer's offset write, so it may
    /// grow the storage per the wrapped handle's policy. The cursor
    /// advances on success only.
    ///
    /// # Errors
    ///
    /// Propagates [`Buffer::write_at`] failures.
    pub fn put(&mut self, value: T) -> Result<(), BufferError> {
        let mut scratch = [0u8; tarn_core::MAX_WIDTH];
        value.store_ne(&mut scratch[..T::WIDTH]);
        let offset = self.pos.saturating_mul(T::WIDTH);
        self.buffer.write_at(&scratch[..T::WIDTH], offset)?;
        self.pos += 1;
        self.refresh_eof();
        Ok(())
    }

    /// Advance the cursor by `n` elements.
    pub fn forward(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n);
        self.refresh_eof();
    }

    /// Retreat the cursor by `n` elements, stopping at zero.
    pub fn back(&mut self, n: usize) {
        self.pos = self.pos.saturating_sub(n);
        self.refresh_eof();
    }

    /// Move the cursor to element zero and clear EOF.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.eof = false;
    }

    /// The cached EOF flag: true once the cursor's byte offset has
    /// reached or passed the capacity.
    pub fn eof(&self) -> bool {
        self.eof
    }

    /// Pure lookahead predicate, independent of the cached flag: would
    /// the cursor be at or past the end after moving `lookahead`
    /// elements forward?
    pub fn eof_within(&self, lookahead: usize) -> bool {
        let elements = self.pos.saturating_add(lookahead);
        elements.saturating_mul(T::WIDTH) >= self.buffer.capacity()
    }

    /// Current cursor position in elements.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The wrapped buffer handle.
    pub fn buffer(&self) -> &Buffer<A> {
        &self.buffer
    }

    /// Zero-copy view of the whole elements from the cursor to the end
    /// of the storage.
    ///
    /// This is an escape hatch for interop. The returned slice borrows
    /// `self`, but the storage it points into is shared and can be
    /// swapped by growth on *any* handle of the same allocation.
    ///
    /// # Safety
    ///
    /// While the slice is live the caller must ensure no handle of
    /// this allocation writes, grows, or drops the last reference —
    /// the borrow checker cannot see those aliases. The caller must
    /// also ensure the storage is aligned for `T` at the cursor's byte
    /// offset: the allocator contract only promises byte alignment
    /// (the default heap allocator returns blocks aligned well beyond
    /// any [`Scalar`] width, but a custom allocator may not).
    pub unsafe fn raw_elements(&self) -> &[T] {
        let (ptr, capacity) = self.buffer.storage_snapshot();
        let offset = self.pos.saturating_mul(T::WIDTH);
        let available = capacity.saturating_sub(offset) / T::WIDTH;
        debug_assert!(ptr.as_ptr() as usize % std::mem::align_of::<T>() == 0);
        // SAFETY: offset + available * WIDTH <= capacity, the storage
        // is live while our handle exists, every Scalar impl is a
        // primitive for which any bit pattern is a valid value, and
        // the caller vouches for alignment and exclusive access.
        unsafe { std::slice::from_raw_parts(ptr.as_ptr().add(offset).cast::<T>(), available) }
    }

    fn refresh_eof(&mut self) {
        self.eof = self.pos.saturating_mul(T::WIDTH) >= self.buffer.capacity();
    }
}

impl<T: Scalar, A: RawAllocator> Iterator for Stream<T, A> {
    type Item = T;

    /// Sequential consumption: yields elements until the soft EOF.
    fn next(&mut self) -> Option<T> {
        self.get()
    }
}

/// Stream of raw bytes (width 1).
pub type ByteStream<A = HeapAllocator> = Stream<u8, A>;
/// Stream of narrow characters (width 1).
pub type CharStream<A = HeapAllocator> = Stream<i8, A>;
/// Stream of UTF-8 code units (width 1).
pub type Utf8Stream<A = HeapAllocator> = Stream<u8, A>;
/// Stream of UTF-16 code units (width 2).
pub type Utf16Stream<A = HeapAllocator> = Stream<u16, A>;
/// Stream of UTF-32 code units (width 4).
pub type Utf32Stream<A = HeapAllocator> = Stream<u32, A>;
