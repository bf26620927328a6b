use crate::{Aggregate, Reducer};
use sieve_parallel::Workers;
use std::sync::{Mutex, PoisonError};
use tracing::trace;

/// Scans each chunk into a thread-local [`Aggregate`], then merges it into the global
/// aggregate under a single [`Mutex`].
///
/// Workers never touch shared state while scanning. The critical section only covers
/// the final merge, so each worker takes the lock exactly once per run.
#[derive(Clone, Debug)]
pub struct Locked {
    workers: Workers,
    threshold: i32,
}

impl Locked {
    pub fn new(workers: Workers, threshold: i32) -> Self {
        Self { workers, threshold }
    }
}

impl Reducer for Locked {
    fn name(&self) -> &'static str {
        "locked"
    }

    fn threshold(&self) -> i32 {
        self.threshold
    }

    fn reduce(&self, values: &[i32]) -> Aggregate {
        let global = Mutex::new(Aggregate::default());
        self.workers.for_each_chunk(values.len(), |index, chunk| {
            let partial = Aggregate::scan(&values[chunk], self.threshold);
            trace!(index, %partial, "merging partial");

            // A merge never leaves the aggregate half-updated, so a poisoned lock is still
            // safe to use.
            let mut global = global.lock().unwrap_or_else(PoisonError::into_inner);
            *global = global.merge(partial);
        });
        global.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
