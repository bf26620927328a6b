//! Count and find the maximum of elements above a threshold, sequentially or in parallel.
//!
//! Every strategy implements [`Reducer`] and returns an [`Aggregate`]: the number of elements
//! strictly greater than the threshold and the largest such element (if any). All strategies
//! produce identical results for the same dataset and threshold; they differ only in how work
//! is distributed and how partial results are combined:
//!
//! - [`Sequential`]: a single pass on the calling thread
//! - [`Locked`]: one thread-local scan per chunk, merged into a global aggregate under a
//!   mutex
//! - [`LockFree`]: every qualifying element is merged into shared atomics, using
//!   compare-and-swap to raise the maximum
//!
//! # Example
//!
//! ```
//! use sieve_parallel::Workers;
//! use sieve_reduce::{LockFree, Locked, Reducer, Sequential, DEFAULT_THRESHOLD};
//!
//! let workers = Workers::from_count(4).unwrap();
//! let values = [5, 15, -3, 200, 10, 11];
//!
//! let expected = Sequential::new(DEFAULT_THRESHOLD).reduce(&values);
//! assert_eq!(expected.count, 3);
//! assert_eq!(expected.max, Some(200));
//!
//! assert_eq!(Locked::new(workers.clone(), DEFAULT_THRESHOLD).reduce(&values), expected);
//! assert_eq!(LockFree::new(workers, DEFAULT_THRESHOLD).reduce(&values), expected);
//! ```

use std::fmt;

mod aggregate;
pub use aggregate::Aggregate;
pub mod dataset;
mod error;
pub use error::Error;
mod lock_free;
pub use lock_free::LockFree;
mod locked;
pub use locked::Locked;
mod sequential;
pub use sequential::Sequential;

/// Elements must be strictly greater than this value to be counted.
pub const DEFAULT_THRESHOLD: i32 = 10;

/// A strategy for computing an [`Aggregate`] over a dataset.
pub trait Reducer: Send + Sync + fmt::Debug {
    /// Short label identifying the strategy.
    fn name(&self) -> &'static str;

    /// Elements strictly greater than this value are counted.
    fn threshold(&self) -> i32;

    /// Computes the aggregate over `values`.
    ///
    /// Returns only once all work spawned for this call has completed.
    fn reduce(&self, values: &[i32]) -> Aggregate;
}
