//! Logical timestamps and rollover-safe age comparison
//!
//! The table stamps each new entry from a fixed-width counter. Once that
//! counter has wrapped, plain `<` on two stamps no longer says which one is
//! older, so ages are computed with serial-number arithmetic: the distance
//! from an entry's stamp forward to the reference time, modulo `2^W`.
//!
//! ```text
//!   d = reference - created_at  (mod 2^W)
//!
//!   d == 0            Lapped     a full lap ago, oldest possible
//!   0 < d < HALF      Behind(d)  d ticks in the past
//!   HALF <= d         Ahead(d)   far half, treated as not yet in the past
//! ```

use std::fmt::Debug;
use std::hash::Hash;

/// Fixed-width unsigned counter usable as a logical clock
pub trait Timestamp: Copy + Ord + Hash + Debug + Default + Send + Sync + 'static {
    const ZERO: Self;
    const MAX: Self;
    /// `2^(W-1)`, the first distance that falls in the far half
    const HALF: Self;

    fn wrapping_sub(self, rhs: Self) -> Self;

    /// The next stamp, wrapping to zero after `MAX`
    fn successor(self) -> Self;

    fn as_u64(self) -> u64;
}

macro_rules! impl_timestamp {
    ($($t:ty),*) => {
        $(
            impl Timestamp for $t {
                const ZERO: Self = 0;
                const MAX: Self = <$t>::MAX;
                const HALF: Self = 1 << (<$t>::BITS - 1);

                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    <$t>::wrapping_sub(self, rhs)
                }

                #[inline]
                fn successor(self) -> Self {
                    self.wrapping_add(1)
                }

                #[inline]
                fn as_u64(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_timestamp!(u8, u16, u32, u64);

/// Age of a stamp relative to a reference time
///
/// Ordered youngest to oldest: every `Ahead` is younger than every
/// `Behind`, which is younger than `Lapped`. Within a variant the larger
/// distance is older.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Age<T> {
    Ahead(T),
    Behind(T),
    Lapped,
}

/// Classify `created_at` against `reference` using circular distance
#[inline]
pub fn age<T: Timestamp>(created_at: T, reference: T) -> Age<T> {
    let distance = reference.wrapping_sub(created_at);
    if distance == T::ZERO {
        Age::Lapped
    } else if distance < T::HALF {
        Age::Behind(distance)
    } else {
        Age::Ahead(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_constants() {
        assert_eq!(<u8 as Timestamp>::HALF, 128);
        assert_eq!(<u16 as Timestamp>::HALF, 1 << 15);
        assert_eq!(<u32 as Timestamp>::HALF, 1 << 31);
        assert_eq!(<u64 as Timestamp>::HALF, 1 << 63);
    }

    #[test]
    fn test_successor_wraps() {
        assert_eq!(254u8.successor(), 255);
        assert_eq!(255u8.successor(), 0);
        assert_eq!(u64::MAX.successor(), 0);
    }

    #[test]
    fn test_age_classification() {
        assert_eq!(age(10u8, 10), Age::Lapped);
        assert_eq!(age(9u8, 10), Age::Behind(1));
        assert_eq!(age(250u8, 4), Age::Behind(10));
        assert_eq!(age(11u8, 10), Age::Ahead(255));
        // exactly half way is ambiguous and ranks as ahead
        assert_eq!(age(0u8, 128), Age::Ahead(128));
        assert_eq!(age(1u8, 128), Age::Behind(127));
    }

    #[test]
    fn test_age_ordering() {
        assert!(Age::Lapped > Age::Behind(u64::MAX));
        assert!(Age::Behind(1u64) > Age::Ahead(u64::MAX));
        assert!(Age::Behind(5u64) > Age::Behind(4));
        assert!(Age::Ahead(5u64) > Age::Ahead(4));
    }

    #[test]
    fn test_wrapped_stamp_is_older_than_recent_one() {
        // stamped just before the wrap vs just after it
        let reference = 3u16;
        assert!(age(u16::MAX - 1, reference) > age(1, reference));
    }
}
