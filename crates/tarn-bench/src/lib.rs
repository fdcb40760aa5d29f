//! Benchmark support crate for tarn.
//!
//! Holds no library code of its own — the criterion benches under
//! `benches/` depend on the workspace crates directly. Kept as a
//! separate `publish = false` member so bench-only dependencies stay
//! out of the library crates.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
