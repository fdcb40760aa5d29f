//! Tarn: a shared-ownership growable raw buffer with typed streams.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the tarn sub-crates. For most users, adding `tarn` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tarn::prelude::*;
//!
//! // Allocate a zero-filled 16-byte buffer on the platform heap.
//! let mut buf = Buffer::<HeapAllocator>::new(16).unwrap();
//!
//! // Sequential scalar writes through the handle's cursor.
//! for v in [1u32, 2, 3, 4] {
//!     buf.write_scalar(v).unwrap();
//! }
//!
//! // A typed stream is an independent owner with its own cursor.
//! let mut stream = buf.utf32_stream();
//! assert_eq!(stream.get(), Some(1));
//! assert_eq!(stream.peek(), Some(2));
//! assert_eq!(stream.get(), Some(2));
//!
//! // Reference copies share storage; the last owner frees it.
//! let sibling = buf.clone();
//! assert_eq!(sibling.ref_count(), 3); // buf + stream + sibling
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`buffer`] | `tarn-buffer` | [`buffer::Buffer`], [`buffer::Stream`], the allocator capability |
//! | [`types`] | `tarn-core` | [`types::BufferError`], the [`types::Scalar`] element trait |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Buffer, stream, and allocator capability (`tarn-buffer`).
///
/// Most users only need [`buffer::Buffer`] and the stream factories on
/// it — they are also available in the [`prelude`].
pub use tarn_buffer as buffer;

/// Core types and traits (`tarn-core`).
///
/// Contains the error taxonomy ([`types::BufferError`]) and the
/// fixed-width element trait ([`types::Scalar`]).
pub use tarn_core as types;

/// Common imports for typical tarn usage.
///
/// ```rust
/// use tarn::prelude::*;
/// ```
pub mod prelude {
    pub use tarn_buffer::{
        Buffer, BufferOptions, ByteStream, CharStream, HeapAllocator, RawAllocator, Stream,
        Utf16Stream, Utf32Stream, Utf8Stream,
    };
    pub use tarn_core::{BufferError, Scalar};
}
