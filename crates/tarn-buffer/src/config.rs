//! Buffer policy options.

/// Per-handle policy for a [`Buffer`](crate::Buffer).
///
/// Every handle carries its own copy of these options, seeded from the
/// handle it was cloned from. Changing an option on one handle never
/// affects siblings sharing the same allocation — capacity, storage,
/// and the reference count are shared; policy is deliberately not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferOptions {
    /// Grow the storage instead of failing when a write overflows.
    ///
    /// Default: `true`. With this disabled, an overflowing write fails
    /// with `CapacityExceeded` and mutates nothing.
    pub auto_expand: bool,

    /// Free the storage when the last handle drops.
    ///
    /// Default: `true`. If the *last-dropping* handle has this
    /// disabled, the block is intentionally leaked — useful when the
    /// pointer has been handed to foreign code that outlives all
    /// handles.
    pub auto_release: bool,

    /// Bytes added per growth step.
    ///
    /// Default: [`BufferOptions::DEFAULT_EXPAND_INCREMENT`]. Must be
    /// non-zero for growth to make progress; a write that needs more
    /// than one increment grows repeatedly until it fits.
    pub expand_increment: usize,
}

impl BufferOptions {
    /// Default growth step: 16 KiB per expansion.
    pub const DEFAULT_EXPAND_INCREMENT: usize = 16 * 1024;

    /// Options with both policies enabled and the default increment.
    pub fn new() -> Self {
        Self {
            auto_expand: true,
            auto_release: true,
            expand_increment: Self::DEFAULT_EXPAND_INCREMENT,
        }
    }
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self::new()
    }
}
