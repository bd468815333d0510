use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Enforce daily and weekly velocity limits on a stream of load requests
#[derive(Parser, Debug)]
#[command(name = "velocity-limits")]
#[command(about = "Accept or reject load funds requests against velocity limits", long_about = None)]
pub struct CliArgs {
    /// Input file with one JSON load request per line
    #[arg(value_name = "INPUT", help = "Path to the input file")]
    pub input_file: PathBuf,

    /// Output file for responses (stdout if omitted)
    #[arg(
        long = "output",
        short = 'o',
        value_name = "OUTPUT",
        help = "Path to write responses to (default: stdout)"
    )]
    pub output_file: Option<PathBuf>,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for single-threaded or 'async' for batched parallel processing"
    )]
    pub strategy: StrategyType,

    /// Number of requests per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of requests per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced by
    /// the defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }
}
