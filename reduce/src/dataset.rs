//! Generate datasets of uniformly distributed integers.

use crate::Error;
use rand::{distributions::Uniform, Rng};
use tracing::debug;

/// Lower bound used when no range is configured.
pub const DEFAULT_LOW: i32 = -100;

/// Upper bound used when no range is configured.
pub const DEFAULT_HIGH: i32 = 200;

/// An inclusive range `[low, high]` to sample values from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    low: i32,
    high: i32,
}

impl Range {
    /// Creates a new range, rejecting `low > high`.
    pub fn new(low: i32, high: i32) -> Result<Self, Error> {
        if low > high {
            return Err(Error::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    /// Returns true if `value` lies within the range.
    pub fn contains(&self, value: i32) -> bool {
        (self.low..=self.high).contains(&value)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW,
            high: DEFAULT_HIGH,
        }
    }
}

/// Generates `len` values sampled independently and uniformly from `range`.
///
/// The dataset is allocated up front. If the allocation cannot be satisfied,
/// [`Error::Allocation`] is returned instead of aborting.
pub fn generate<R: Rng>(rng: &mut R, len: usize, range: Range) -> Result<Vec<i32>, Error> {
    let mut values = Vec::new();
    values.try_reserve_exact(len)?;
    let distribution = Uniform::new_inclusive(range.low, range.high);
    values.extend(rng.sample_iter(distribution).take(len));
    debug!(len, low = range.low, high = range.high, "generated dataset");
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn values_within_range() {
        let mut rng = StdRng::seed_from_u64(0);
        let range = Range::default();
        let values = generate(&mut rng, 10_000, range).unwrap();
        assert_eq!(values.len(), 10_000);
        assert!(values.iter().all(|&value| range.contains(value)));
    }

    #[test]
    fn bounds_are_reachable() {
        let mut rng = StdRng::seed_from_u64(1);
        let range = Range::new(0, 3).unwrap();
        let values = generate(&mut rng, 10_000, range).unwrap();
        assert!(values.contains(&0));
        assert!(values.contains(&3));
    }

    #[test]
    fn same_seed_same_dataset() {
        let a = generate(&mut StdRng::seed_from_u64(42), 1_000, Range::default()).unwrap();
        let b = generate(&mut StdRng::seed_from_u64(42), 1_000, Range::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_dataset() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate(&mut rng, 0, Range::default()).unwrap().is_empty());
    }

    #[test]
    fn single_value_range() {
        let mut rng = StdRng::seed_from_u64(0);
        let range = Range::new(7, 7).unwrap();
        let values = generate(&mut rng, 100, range).unwrap();
        assert!(values.iter().all(|&value| value == 7));
    }

    #[test]
    fn inverted_range_rejected() {
        assert!(matches!(
            Range::new(5, 4),
            Err(Error::InvalidRange { low: 5, high: 4 })
        ));
    }

    #[test]
    fn oversized_dataset_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = generate(&mut rng, usize::MAX, Range::default());
        assert!(matches!(result, Err(Error::Allocation(_))));
    }
}
