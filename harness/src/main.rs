//! Benchmark sequential, lock-based and lock-free threshold reductions.
//!
//! # Usage
//!
//! A dataset of 1,000,000 values sampled uniformly from `[-100, 200]` is reduced with 4
//! workers, counting the values greater than 10. The binary takes no options:
//!
//! ```sh
//! cargo run --release --bin sieve
//! ```
//!
//! Results are written to stdout. Logs are written to stderr.

use sieve_harness::{command, report, Config};
use std::process;
use tracing::{error, Level};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    // Reject any arguments (other than --help and --version)
    let _ = command().get_matches();

    // Run strategies
    match report(&Config::default()) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            error!(%err, "benchmark failed");
            process::exit(1);
        }
    }
}
