use std::cmp::Ordering;
use std::fmt::Debug;

/// Ordered, summable edge cost.
///
/// `INFINITY` marks an unreachable distance: it compares greater than every
/// finite value and absorbs under [`Weight::plus`]. Integer weights use
/// `MAX` as the sentinel and saturate; float weights use IEEE infinity.
pub trait Weight: Copy + Debug + PartialOrd {
    const ZERO: Self;
    const INFINITY: Self;

    /// Addition with `INFINITY` absorbing: `x.plus(INFINITY) == INFINITY`.
    fn plus(self, rhs: Self) -> Self;

    /// Total order used by the priority frontier.
    fn total_cmp(&self, other: &Self) -> Ordering;

    fn is_infinite(&self) -> bool {
        *self == Self::INFINITY
    }

    fn is_negative(&self) -> bool {
        *self < Self::ZERO
    }
}

macro_rules! int_weight {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            const ZERO: Self = 0;
            const INFINITY: Self = <$t>::MAX;

            #[inline]
            fn plus(self, rhs: Self) -> Self {
                if self == Self::INFINITY || rhs == Self::INFINITY {
                    Self::INFINITY
                } else {
                    self.saturating_add(rhs)
                }
            }

            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
        }
    )*};
}

macro_rules! float_weight {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            const ZERO: Self = 0.0;
            const INFINITY: Self = <$t>::INFINITY;

            #[inline]
            fn plus(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                <$t>::total_cmp(self, other)
            }
        }
    )*};
}

int_weight!(i32, i64, u32, u64);
float_weight!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    /// Travel time in whole seconds, standing in for a unit type owned elsewhere.
    #[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
    struct Seconds(u32);

    impl Weight for Seconds {
        const ZERO: Self = Seconds(0);
        const INFINITY: Self = Seconds(u32::MAX);

        fn plus(self, rhs: Self) -> Self {
            Seconds(self.0.plus(rhs.0))
        }

        fn total_cmp(&self, other: &Self) -> Ordering {
            self.0.cmp(&other.0)
        }
    }

    #[test]
    fn test_zero_is_identity() {
        assert_eq!(7i64.plus(i64::ZERO), 7);
        assert_eq!(2.5f64.plus(f64::ZERO), 2.5);
        assert_eq!(Seconds(30).plus(Seconds::ZERO), Seconds(30));
    }

    #[test]
    fn test_infinity_absorbs() {
        assert!(i32::INFINITY.plus(-5).is_infinite());
        assert!(5u64.plus(u64::INFINITY).is_infinite());
        assert!(f64::INFINITY.plus(1e300).is_infinite());
        assert!(Seconds(10).plus(Seconds::INFINITY).is_infinite());
    }

    #[test]
    fn test_integer_addition_saturates() {
        assert!((u32::MAX - 1).plus(10).is_infinite());
        assert_eq!(3i32.plus(-4), -1);
    }

    #[test]
    fn test_infinity_orders_last() {
        assert_eq!(1e308f64.total_cmp(&f64::INFINITY), Ordering::Less);
        assert_eq!(i64::INFINITY.total_cmp(&0), Ordering::Greater);
        assert!(Seconds(0) < Seconds::INFINITY);
    }

    #[test]
    fn test_is_negative() {
        assert!(Weight::is_negative(&-0.5f32));
        assert!(Weight::is_negative(&-3i64));
        assert!(!Weight::is_negative(&0i32));
        assert!(!Weight::is_negative(&0.0f64));
        assert!(!Weight::is_negative(&-0.0f64));
        assert!(!Weight::is_negative(&f64::INFINITY));
        assert!(!Weight::is_negative(&u64::ZERO));
    }
}
