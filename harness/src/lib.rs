//! Time each reduction strategy over one shared dataset and report the results.
//!
//! A run generates a single dataset, then invokes [`Sequential`], [`Locked`] and [`LockFree`]
//! one after another (never concurrently) over that same dataset. Each invocation is wrapped
//! in [`timed`], so the clock covers exactly the work of one strategy, from dispatch until
//! all of its workers have joined.

use clap::Command;
use rand::{rngs::StdRng, SeedableRng};
use sieve_parallel::Workers;
use sieve_reduce::{
    dataset::{self, Range},
    Aggregate, LockFree, Locked, Reducer, Sequential, DEFAULT_THRESHOLD,
};
use std::{
    fmt,
    num::NonZeroUsize,
    time::{Duration, Instant},
};
use thiserror::Error;
use tracing::{debug, info};

/// Number of values generated when no size is configured.
pub const DEFAULT_SIZE: usize = 1_000_000;

/// Number of workers used when no count is configured.
pub const DEFAULT_WORKERS: usize = 4;

/// Errors that abort a run before any strategy is invoked.
#[derive(Error, Debug)]
pub enum Error {
    #[error("workers: {0}")]
    Workers(#[from] sieve_parallel::Error),
    #[error("dataset: {0}")]
    Dataset(#[from] sieve_reduce::Error),
}

/// Configuration of a benchmark run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of values in the dataset.
    pub size: usize,

    /// Number of threads used by the parallel strategies.
    pub workers: usize,

    /// Values strictly greater than this are counted.
    pub threshold: i32,

    /// Range the dataset is sampled from.
    pub range: Range,

    /// Seed for the dataset. If `None`, the dataset is seeded from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            workers: DEFAULT_WORKERS,
            threshold: DEFAULT_THRESHOLD,
            range: Range::default(),
            seed: None,
        }
    }
}

impl Config {
    /// Checks the configuration, returning the worker count.
    pub fn validate(&self) -> Result<NonZeroUsize, Error> {
        NonZeroUsize::new(self.workers)
            .ok_or(Error::Workers(sieve_parallel::Error::InvalidWorkers))
    }
}

/// The outcome of one timed strategy invocation.
#[derive(Clone, Debug)]
pub struct Sample {
    pub name: &'static str,
    pub threshold: i32,
    pub aggregate: Aggregate,
    pub elapsed: Duration,
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Strategy: {}", self.name)?;
        writeln!(
            f,
            "Number of elements > {}: {}",
            self.threshold, self.aggregate.count
        )?;
        match self.aggregate.max {
            Some(max) => writeln!(f, "Largest element > {}: {}", self.threshold, max)?,
            None => writeln!(f, "No items > {} found.", self.threshold)?,
        }
        write!(f, "Execution time: {} second", self.elapsed.as_secs_f64())
    }
}

/// Runs `f`, returning its output and the wall-clock time it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let output = f();
    (output, start.elapsed())
}

/// Builds every strategy, in the order they are benchmarked.
pub fn strategies(workers: Workers, threshold: i32) -> Vec<Box<dyn Reducer>> {
    vec![
        Box::new(Sequential::new(threshold)),
        Box::new(Locked::new(workers.clone(), threshold)),
        Box::new(LockFree::new(workers, threshold)),
    ]
}

/// Invokes `reducer` over `values` and records how long it took.
pub fn measure(reducer: &dyn Reducer, values: &[i32]) -> Sample {
    let (aggregate, elapsed) = timed(|| reducer.reduce(values));
    debug!(name = reducer.name(), %aggregate, ?elapsed, "strategy completed");
    Sample {
        name: reducer.name(),
        threshold: reducer.threshold(),
        aggregate,
        elapsed,
    }
}

/// Generates one dataset and benchmarks every strategy over it.
///
/// All configuration is validated, and the workers and dataset are allocated, before the
/// first strategy runs.
pub fn run(config: &Config) -> Result<Vec<Sample>, Error> {
    let size = config.validate()?;
    let workers = Workers::new(size)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let values = dataset::generate(&mut rng, config.size, config.range)?;
    info!(
        size = config.size,
        workers = size.get(),
        threshold = config.threshold,
        seed = ?config.seed,
        "running strategies"
    );

    Ok(strategies(workers, config.threshold)
        .iter()
        .map(|reducer| measure(reducer.as_ref(), &values))
        .collect())
}

/// Runs `config` and renders every sample, separated by blank lines.
pub fn report(config: &Config) -> Result<String, Error> {
    let samples = run(config)?;
    Ok(samples
        .iter()
        .map(Sample::to_string)
        .collect::<Vec<_>>()
        .join("\n\n"))
}

/// The command line of the `sieve` binary.
///
/// Every run uses [`Config::default`], so no options are accepted beyond `--help` and
/// `--version`.
pub fn command() -> Command {
    Command::new("sieve")
        .about("benchmark sequential, lock-based and lock-free threshold reductions")
        .version(env!("CARGO_PKG_VERSION"))
}
