//! Count and maximum of the elements that exceed a threshold.

use std::fmt;

/// The count and maximum of all elements strictly greater than a threshold.
///
/// `count` is a `u64` and cannot overflow for any dataset addressable on a 64-bit target.
/// `max` is `None` until a qualifying element has been observed, so `count == 0` if and
/// only if `max.is_none()`.
///
/// [`Aggregate::default`] is the identity of [`Aggregate::merge`], and merging is
/// associative and commutative. Any grouping of partial aggregates therefore combines to the
/// same result as a single scan over the whole dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Aggregate {
    pub count: u64,
    pub max: Option<i32>,
}

impl Aggregate {
    /// Scans `values`, counting (and tracking the maximum of) every element above `threshold`.
    pub fn scan(values: &[i32], threshold: i32) -> Self {
        let mut aggregate = Self::default();
        for &value in values {
            aggregate.observe(value, threshold);
        }
        aggregate
    }

    /// Records `value` if it is strictly greater than `threshold`.
    #[inline]
    pub fn observe(&mut self, value: i32, threshold: i32) {
        if value <= threshold {
            return;
        }
        self.count += 1;
        match self.max {
            Some(max) if max >= value => {}
            _ => self.max = Some(value),
        }
    }

    /// Combines two aggregates: counts are summed and the larger maximum is kept.
    pub fn merge(self, other: Self) -> Self {
        Self {
            count: self.count + other.count,
            // `None` orders below every `Some`
            max: self.max.max(other.max),
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "count={} max={}", self.count, max),
            None => write!(f, "count={} max=none", self.count),
        }
    }
}
