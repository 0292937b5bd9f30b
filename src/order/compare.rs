//! Three-way comparisons over the value kinds TupleFlow records sort by.
//!
//! Every function returns a negative, zero or positive `i32` and defines a
//! total order:
//! - integers compare by direct relation, never by subtraction;
//! - floats order NaN above every number and equal to itself, and treat
//!   `-0.0` and `+0.0` as equal;
//! - strings compare by Unicode scalar value;
//! - byte strings compare as unsigned octets, then by length.

use std::cmp::Ordering;

/// Map an [`Ordering`] to `-1`, `0` or `+1`.
#[must_use]
pub const fn ordering_sign(ordering: Ordering) -> i32 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

#[must_use]
pub fn compare_i32(one: i32, two: i32) -> i32 {
    ordering_sign(one.cmp(&two))
}

#[must_use]
pub fn compare_i64(one: i64, two: i64) -> i32 {
    ordering_sign(one.cmp(&two))
}

#[must_use]
pub fn compare_f32(one: f32, two: f32) -> i32 {
    ordering_sign(float_order(one.is_nan(), two.is_nan(), one.partial_cmp(&two)))
}

#[must_use]
pub fn compare_f64(one: f64, two: f64) -> i32 {
    ordering_sign(float_order(one.is_nan(), two.is_nan(), one.partial_cmp(&two)))
}

fn float_order(one_nan: bool, two_nan: bool, numeric: Option<Ordering>) -> Ordering {
    match (one_nan, two_nan) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => numeric.unwrap_or(Ordering::Equal),
    }
}

/// UTF-8 byte order coincides with scalar-value order.
#[must_use]
pub fn compare_str(one: &str, two: &str) -> i32 {
    ordering_sign(one.cmp(two))
}

/// Unsigned lexicographic order; on a shared prefix, the length difference
/// (clamped to `i32`) decides.
#[must_use]
pub fn compare_bytes(one: &[u8], two: &[u8]) -> i32 {
    for (a, b) in one.iter().zip(two) {
        match a.cmp(b) {
            Ordering::Equal => {}
            other => return ordering_sign(other),
        }
    }
    length_difference(one.len(), two.len())
}

fn length_difference(one: usize, two: usize) -> i32 {
    if one >= two {
        i32::try_from(one - two).unwrap_or(i32::MAX)
    } else {
        i32::try_from(two - one).map_or(i32::MIN, |diff| -diff)
    }
}

/// A value with a total three-way comparison.
pub trait TotalOrder {
    fn compare(&self, other: &Self) -> i32;

    /// The comparison as an [`Ordering`].
    fn ordering(&self, other: &Self) -> Ordering {
        self.compare(other).cmp(&0)
    }
}

impl TotalOrder for i32 {
    fn compare(&self, other: &Self) -> i32 {
        compare_i32(*self, *other)
    }
}

impl TotalOrder for i64 {
    fn compare(&self, other: &Self) -> i32 {
        compare_i64(*self, *other)
    }
}

impl TotalOrder for f32 {
    fn compare(&self, other: &Self) -> i32 {
        compare_f32(*self, *other)
    }
}

impl TotalOrder for f64 {
    fn compare(&self, other: &Self) -> i32 {
        compare_f64(*self, *other)
    }
}

impl TotalOrder for str {
    fn compare(&self, other: &Self) -> i32 {
        compare_str(self, other)
    }
}

impl TotalOrder for String {
    fn compare(&self, other: &Self) -> i32 {
        compare_str(self, other)
    }
}

impl TotalOrder for [u8] {
    fn compare(&self, other: &Self) -> i32 {
        compare_bytes(self, other)
    }
}

impl TotalOrder for Vec<u8> {
    fn compare(&self, other: &Self) -> i32 {
        compare_bytes(self, other)
    }
}

/// Wrapper that gives any [`TotalOrder`] value `Ord`, so floats and byte
/// strings can key sorts and ordered maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Total<T>(pub T);

impl<T: TotalOrder> PartialEq for Total<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.compare(&other.0) == 0
    }
}

impl<T: TotalOrder> Eq for Total<T> {}

impl<T: TotalOrder> PartialOrd for Total<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: TotalOrder> Ord for Total<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.ordering(&other.0)
    }
}
