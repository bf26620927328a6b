//! Partition index ranges and run one task per partition on a fixed set of workers.
//!
//! This crate provides the two building blocks shared by every parallel reducer:
//!
//! - [`partition`]: splits `[0, len)` into a fixed number of contiguous chunks
//! - [`Workers`]: a pool of exactly `W` threads that runs one task per chunk and
//!   returns only once every task has completed
//!
//! # Partitioning
//!
//! Chunks are computed with a fixed base length of `len / W`. Every chunk but the last
//! spans exactly `base` indices, and the last chunk absorbs the remainder `len % W`. When
//! `len < W`, the base is zero and all chunks but the last are empty. Empty chunks are
//! valid and never produce an out-of-bounds range.
//!
//! # Example
//!
//! ```
//! use sieve_parallel::Workers;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let workers = Workers::from_count(4).unwrap();
//! let data: Vec<u64> = (0..1000).collect();
//! let visited = AtomicUsize::new(0);
//! workers.for_each_chunk(data.len(), |_, chunk| {
//!     visited.fetch_add(data[chunk].len(), Ordering::Relaxed);
//! });
//! assert_eq!(visited.into_inner(), 1000);
//! ```

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::{num::NonZeroUsize, ops::Range, sync::Arc};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when configuring [`Workers`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("worker count must be positive")]
    InvalidWorkers,
    #[error("failed to spawn workers: {0}")]
    Pool(#[from] ThreadPoolBuildError),
}

/// Splits `[0, len)` into `workers` contiguous, disjoint chunks.
///
/// The returned chunks are ordered, `chunks[i].end == chunks[i + 1].start`, and the last
/// chunk always ends at `len`. The last chunk absorbs `len % workers`.
pub fn partition(len: usize, workers: NonZeroUsize) -> Vec<Range<usize>> {
    let workers = workers.get();
    let base = len / workers;
    let mut chunks = Vec::with_capacity(workers);
    for i in 0..workers - 1 {
        chunks.push(i * base..(i + 1) * base);
    }
    chunks.push((workers - 1) * base..len);
    chunks
}

/// A fixed-size pool of worker threads.
///
/// `Workers` holds an [`Arc<ThreadPool>`], so it can be cheaply cloned and shared between
/// reducers. Every clone schedules onto the same threads.
#[derive(Debug, Clone)]
pub struct Workers {
    thread_pool: Arc<ThreadPool>,
    size: NonZeroUsize,
}

impl Workers {
    /// Spawns a pool of exactly `size` threads.
    pub fn new(size: NonZeroUsize) -> Result<Self, Error> {
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(size.get())
            .thread_name(|i| format!("sieve-worker-{i}"))
            .build()?;
        debug!(workers = size.get(), "spawned worker pool");
        Ok(Self {
            thread_pool: Arc::new(thread_pool),
            size,
        })
    }

    /// Spawns a pool from a raw worker count, rejecting zero.
    pub fn from_count(count: usize) -> Result<Self, Error> {
        let size = NonZeroUsize::new(count).ok_or(Error::InvalidWorkers)?;
        Self::new(size)
    }

    /// Returns the number of threads in the pool.
    pub fn size(&self) -> NonZeroUsize {
        self.size
    }

    /// Partitions `[0, len)` into one chunk per worker and runs `task(index, chunk)` for
    /// each chunk on the pool.
    ///
    /// Returns only after every task has completed, so any state written by the tasks is
    /// fully visible to the caller. A panic in any task is propagated once all tasks have
    /// finished.
    pub fn for_each_chunk<F>(&self, len: usize, task: F)
    where
        F: Fn(usize, Range<usize>) + Send + Sync,
    {
        let chunks = partition(len, self.size);
        debug!(len, chunks = chunks.len(), "dispatching chunks");
        let task = &task;
        self.thread_pool.scope(move |scope| {
            for (index, chunk) in chunks.into_iter().enumerate() {
                scope.spawn(move |_| task(index, chunk));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::{collections::BTreeSet, sync::Mutex, thread};

    fn workers(count: usize) -> NonZeroUsize {
        NonZeroUsize::new(count).unwrap()
    }

    #[test]
    fn partition_even_split() {
        let chunks = partition(12, workers(4));
        assert_eq!(chunks, vec![0..3, 3..6, 6..9, 9..12]);
    }

    #[test]
    fn partition_last_absorbs_remainder() {
        let chunks = partition(10, workers(4));
        assert_eq!(chunks, vec![0..2, 2..4, 4..6, 6..10]);
    }

    #[test]
    fn partition_more_workers_than_elements() {
        let chunks = partition(3, workers(4));
        assert_eq!(chunks, vec![0..0, 0..0, 0..0, 0..3]);
    }

    #[test]
    fn partition_empty() {
        let chunks = partition(0, workers(3));
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|chunk| chunk.is_empty()));
    }

    #[test]
    fn partition_single_worker() {
        assert_eq!(partition(7, workers(1)), vec![0..7]);
    }

    #[test]
    fn zero_workers_rejected() {
        assert!(matches!(Workers::from_count(0), Err(Error::InvalidWorkers)));
    }

    #[test]
    fn pool_has_requested_size() {
        let pool = Workers::from_count(3).unwrap();
        assert_eq!(pool.size().get(), 3);
        assert_eq!(pool.thread_pool.current_num_threads(), 3);
    }

    #[test]
    fn tasks_run_on_named_workers() {
        let pool = Workers::from_count(2).unwrap();
        let names = Mutex::new(Vec::new());
        pool.for_each_chunk(100, |_, _| {
            let name = thread::current().name().map(str::to_string);
            names.lock().unwrap().push(name);
        });
        let names = names.into_inner().unwrap();
        assert_eq!(names.len(), 2);
        for name in names {
            assert!(name.unwrap().starts_with("sieve-worker-"));
        }
    }

    #[test]
    fn for_each_chunk_visits_every_chunk_once() {
        let pool = Workers::from_count(4).unwrap();
        let seen = Mutex::new(Vec::new());
        pool.for_each_chunk(3, |index, chunk| {
            seen.lock().unwrap().push((index, chunk));
        });
        let mut seen = seen.into_inner().unwrap();
        seen.sort_by_key(|(index, _)| *index);
        assert_eq!(seen, vec![(0, 0..0), (1, 0..0), (2, 0..0), (3, 0..3)]);
    }

    proptest! {
        #[test]
        fn partition_covers_range(len in 0usize..10_000, count in 1usize..64) {
            let chunks = partition(len, workers(count));
            prop_assert_eq!(chunks.len(), count);
            prop_assert_eq!(chunks[0].start, 0);
            prop_assert_eq!(chunks[count - 1].end, len);
            for pair in chunks.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
            for chunk in &chunks {
                prop_assert!(chunk.start <= chunk.end);
            }
            let total: usize = chunks.iter().map(|chunk| chunk.len()).sum();
            prop_assert_eq!(total, len);
        }

        #[test]
        fn for_each_chunk_covers_indices(len in 0usize..2_000, count in 1usize..8) {
            let pool = Workers::from_count(count).unwrap();
            let indices = Mutex::new(Vec::new());
            pool.for_each_chunk(len, |_, chunk| {
                indices.lock().unwrap().extend(chunk);
            });
            let indices = indices.into_inner().unwrap();
            prop_assert_eq!(indices.len(), len);
            let unique: BTreeSet<usize> = indices.into_iter().collect();
            prop_assert_eq!(unique, (0..len).collect::<BTreeSet<usize>>());
        }
    }
}
