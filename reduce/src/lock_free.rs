use crate::{Aggregate, Reducer};
use sieve_parallel::Workers;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Marks an empty maximum. Strictly less than every `i32`.
const NO_MAX: i64 = i64::MIN;

/// Accumulators shared by every worker of a [`LockFree`] run.
struct Shared {
    count: AtomicU64,
    max: AtomicI64,
}

impl Shared {
    fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
            max: AtomicI64::new(NO_MAX),
        }
    }

    /// Records a qualifying value.
    ///
    /// The count is a plain `fetch_add`. The maximum is raised with a compare-and-swap loop
    /// that only ever stores a strictly larger value, and gives up as soon as it observes a
    /// value at least as large as `value`.
    #[inline]
    fn record(&self, value: i32) {
        self.count.fetch_add(1, Ordering::Relaxed);

        let value = i64::from(value);
        let mut current = self.max.load(Ordering::Relaxed);
        while value > current {
            match self.max.compare_exchange_weak(
                current,
                value,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }
    }

    /// Reads the accumulators. Only valid once every worker has joined.
    fn into_aggregate(self) -> Aggregate {
        let count = self.count.into_inner();
        let max = self.max.into_inner();

        // Only `i32` values are ever stored over the sentinel
        Aggregate {
            count,
            max: (max != NO_MAX).then_some(max as i32),
        }
    }
}

/// Merges every qualifying element directly into shared atomics.
///
/// Unlike [`crate::Locked`], no partial aggregate is staged: each qualifying element
/// contends on the shared count and maximum as soon as it is seen.
#[derive(Clone, Debug)]
pub struct LockFree {
    workers: Workers,
    threshold: i32,
}

impl LockFree {
    pub fn new(workers: Workers, threshold: i32) -> Self {
        Self { workers, threshold }
    }
}

impl Reducer for LockFree {
    fn name(&self) -> &'static str {
        "lock-free"
    }

    fn threshold(&self) -> i32 {
        self.threshold
    }

    fn reduce(&self, values: &[i32]) -> Aggregate {
        let shared = Shared::new();
        self.workers.for_each_chunk(values.len(), |_, chunk| {
            for &value in &values[chunk] {
                if value > self.threshold {
                    shared.record(value);
                }
            }
        });
        shared.into_aggregate()
    }
}
