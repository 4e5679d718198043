//! # Edge Weights
//!
//! Kruskal's algorithm only needs three things from an edge weight: a zero to
//! start the running total from, addition, and a total order to sort by.
//! The running total uses [`Weight::saturating_add_weight`], which clamps
//! integers at their bounds instead of overflowing. Floats add normally and
//! may reach `±inf`.
//! Primitive floats are only `PartialOrd`, so [`Weight::cmp_weight`] orders
//! them with `total_cmp`. A NaN weight therefore sorts after `+inf` instead of
//! panicking inside the sort.
//!
//! Implementations are provided for every primitive integer and for `f32`/`f64`.

use duplicate::duplicate;
use std::{cmp::Ordering, fmt::Debug, ops::Add};

pub trait Weight: Copy + Debug + Add<Output = Self> {
    fn zero() -> Self;

    fn cmp_weight(&self, other: &Self) -> Ordering;

    fn saturating_add_weight(self, other: Self) -> Self;
}

duplicate! {
    [types zero_value;
        [i8] [0];
        [i16] [0];
        [i32] [0];
        [i64] [0];
        [i128] [0];
        [isize] [0];
        [u8] [0];
        [u16] [0];
        [u32] [0];
        [u64] [0];
        [u128] [0];
        [usize] [0];
        ]

    impl Weight for types {
        fn zero() -> Self {
            zero_value
        }

        fn cmp_weight(&self, other: &Self) -> Ordering {
            self.cmp(other)
        }

        fn saturating_add_weight(self, other: Self) -> Self {
            self.saturating_add(other)
        }
    }
}

duplicate! {
    [types;
        [f32];
        [f64];
        ]

    impl Weight for types {
        fn zero() -> Self {
            0.0
        }

        fn cmp_weight(&self, other: &Self) -> Ordering {
            self.total_cmp(other)
        }

        fn saturating_add_weight(self, other: Self) -> Self {
            self + other
        }
    }
}

#[cfg(test)]
mod test {
    use super::Weight;
    use std::cmp::Ordering;

    #[test]
    fn float_weights_are_totally_ordered() {
        assert_eq!(1.5f64.cmp_weight(&2.0), Ordering::Less);
        assert_eq!(f64::NAN.cmp_weight(&f64::INFINITY), Ordering::Greater);
        assert_eq!(f32::zero(), 0.0);
    }

    #[test]
    fn integer_weights() {
        assert_eq!(7u32.cmp_weight(&7), Ordering::Equal);
        assert_eq!((-3i64).cmp_weight(&2), Ordering::Less);
        assert_eq!(usize::zero() + 4, 4);
    }

    #[test]
    fn integer_sums_saturate() {
        assert_eq!(200u8.saturating_add_weight(100), u8::MAX);
        assert_eq!(i64::MIN.saturating_add_weight(-1), i64::MIN);
        assert_eq!(usize::MAX.saturating_add_weight(0), usize::MAX);
        assert_eq!(f64::MAX.saturating_add_weight(f64::MAX), f64::INFINITY);
    }
}
