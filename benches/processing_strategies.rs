//! Benchmark suite for comparing processing strategies
//!
//! This benchmark compares the performance of synchronous and asynchronous
//! processing strategies using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! # Benchmark Fixtures
//!
//! Three input files are used, each spreading loads over two weeks:
//! - `benchmark_small.txt` - 100 loads across 10 customers
//! - `benchmark_medium.txt` - 1,000 loads across 50 customers
//! - `benchmark_large.txt` - 20,000 loads across 500 customers

use std::path::Path;
use velocity_limits::cli::StrategyType;
use velocity_limits::strategy::{create_strategy, BatchConfig};

fn main() {
    divan::main();
}

const FIXTURES: [&str; 3] = [
    "benches/fixtures/benchmark_small.txt",
    "benches/fixtures/benchmark_medium.txt",
    "benches/fixtures/benchmark_large.txt",
];

/// Benchmark the synchronous strategy
#[divan::bench(args = FIXTURES)]
fn sync_strategy(path: &str) {
    let strategy = create_strategy(StrategyType::Sync, None);
    let mut output = Vec::new();

    strategy
        .process(Path::new(path), &mut output)
        .expect("Processing failed");
}

/// Benchmark the asynchronous strategy with default batching
#[divan::bench(args = FIXTURES)]
fn async_strategy(path: &str) {
    let strategy = create_strategy(StrategyType::Async, Some(BatchConfig::default()));
    let mut output = Vec::new();

    strategy
        .process(Path::new(path), &mut output)
        .expect("Processing failed");
}
