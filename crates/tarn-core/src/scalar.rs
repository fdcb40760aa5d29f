//! Fixed-width scalar elements for typed buffer access.
//!
//! A [`Scalar`] is a trivially-copyable value with a compile-time byte
//! width, stored and loaded in the host's native byte order. There is
//! no endianness normalization anywhere in tarn — a buffer written on
//! one architecture is not portable to another, by design.

/// Upper bound on [`Scalar::WIDTH`] across all implementations.
///
/// The buffer layer uses this to size stack scratch space for scalar
/// reads and writes without a per-width allocation.
pub const MAX_WIDTH: usize = 16;

/// A trivially-copyable fixed-width element.
///
/// Implementations store and load themselves through native-endian byte
/// representations (`to_ne_bytes`/`from_ne_bytes`). The trait is
/// implemented for the primitive integer and float types; downstream
/// crates should not need their own implementations.
pub trait Scalar: Copy {
    /// Width of the element in bytes (`size_of::<Self>()`).
    const WIDTH: usize;

    /// Store the native-endian representation into `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst.len() != Self::WIDTH`. Callers always pass
    /// exact-width slices; a mismatch is a programmer error.
    fn store_ne(self, dst: &mut [u8]);

    /// Load a value from the native-endian representation in `src`.
    ///
    /// # Panics
    ///
    /// Panics if `src.len() != Self::WIDTH`.
    fn load_ne(src: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn store_ne(self, dst: &mut [u8]) {
                    dst.copy_from_slice(&self.to_ne_bytes());
                }

                fn load_ne(src: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(src);
                    <$ty>::from_ne_bytes(raw)
                }
            }
        )*
    };
}

impl_scalar!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn widths_match_size_of() {
        assert_eq!(<u8 as Scalar>::WIDTH, 1);
        assert_eq!(<i8 as Scalar>::WIDTH, 1);
        assert_eq!(<u16 as Scalar>::WIDTH, 2);
        assert_eq!(<u32 as Scalar>::WIDTH, 4);
        assert_eq!(<u64 as Scalar>::WIDTH, 8);
        assert_eq!(<u128 as Scalar>::WIDTH, 16);
        assert_eq!(<f64 as Scalar>::WIDTH, 8);
    }

    #[test]
    fn all_widths_fit_scratch_bound() {
        assert!(<u128 as Scalar>::WIDTH <= MAX_WIDTH);
        assert!(<i128 as Scalar>::WIDTH <= MAX_WIDTH);
        assert!(<usize as Scalar>::WIDTH <= MAX_WIDTH);
    }

    #[test]
    fn store_load_round_trip_u32() {
        let mut raw = [0u8; 4];
        0xDEAD_BEEFu32.store_ne(&mut raw);
        assert_eq!(u32::load_ne(&raw), 0xDEAD_BEEF);
    }

    #[test]
    fn store_uses_host_byte_order() {
        let mut raw = [0u8; 2];
        0x0102u16.store_ne(&mut raw);
        assert_eq!(raw, 0x0102u16.to_ne_bytes());
    }

    #[test]
    #[should_panic]
    fn store_rejects_wrong_width() {
        let mut raw = [0u8; 3];
        1u32.store_ne(&mut raw);
    }

    proptest! {
        #[test]
        fn round_trip_i64(v in any::<i64>()) {
            let mut raw = [0u8; 8];
            v.store_ne(&mut raw);
            prop_assert_eq!(i64::load_ne(&raw), v);
        }

        #[test]
        fn round_trip_f64(v in any::<f64>()) {
            let mut raw = [0u8; 8];
            v.store_ne(&mut raw);
            let back = f64::load_ne(&raw);
            // Compare bit patterns so NaN round trips count as equal.
            prop_assert_eq!(back.to_bits(), v.to_bits());
        }
    }
}
