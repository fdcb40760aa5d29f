//! Shared-ownership growable raw buffer with typed cursor streams.
//!
//! This crate is the storage core of tarn. It manages exactly one heap
//! allocation per buffer and nothing else: reference-counted lifetime,
//! coarse-grained thread safety around mutation and growth, and typed
//! sequential access layered on top.
//!
//! # Architecture
//!
//! ```text
//! Buffer (handle: cursor + options, one per owner)
//! ├── Arc<SharedBlock> (allocation record: ptr, capacity, ref count,
//! │   one mutex guarding all of them)
//! └── Stream<T> (typed cursor view, owns its own Buffer handle)
//! ```
//!
//! Cloning a [`Buffer`] is a *reference copy*: both handles share the
//! same allocation record, each keeps an independent cursor and an
//! independent copy of its [`BufferOptions`]. The storage block is
//! released exactly once, by the last handle to drop (provided that
//! handle still has `auto_release` set).
//!
//! # Concurrency contract
//!
//! The allocation record's mutex serializes offset-based reads and
//! writes, growth, reference-copy increments, and the drop-path
//! decrement — those are safe to call concurrently from threads sharing
//! clones of one buffer. Per-handle cursors and all [`Stream`] state are
//! deliberately unsynchronized; the cursor-based operations take
//! `&mut self` so the type system enforces single-threaded use per
//! handle.
//!
//! # Safety
//!
//! This is the one tarn crate that may contain `unsafe` code. All
//! unsafe is bounded: the primitives live in `raw.rs`, and every unsafe
//! block carries a `// SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod alloc;
pub mod buffer;
pub mod config;
mod raw;
pub mod stream;

pub use alloc::{HeapAllocator, RawAllocator};
pub use buffer::Buffer;
pub use config::BufferOptions;
pub use stream::{ByteStream, CharStream, Stream, Utf16Stream, Utf32Stream, Utf8Stream};
