//! Core types and traits for the tarn shared buffer library.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the error taxonomy shared by every tarn crate and the [`Scalar`]
//! trait that describes the fixed-width elements a typed stream can
//! read and write.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod scalar;

pub use error::BufferError;
pub use scalar::{Scalar, MAX_WIDTH};
