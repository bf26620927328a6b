//! Error types for dataset generation

use std::collections::TryReserveError;
use thiserror::Error;

/// Error type for dataset generation
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid range: {low} > {high}")]
    InvalidRange { low: i32, high: i32 },
    #[error("failed to allocate dataset: {0}")]
    Allocation(#[from] TryReserveError),
}
