//! Velocity Limits CLI
//!
//! Command-line interface for evaluating load funds requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- input.txt > output.txt
//! cargo run -- --output output.txt input.txt
//! cargo run -- --strategy sync input.txt > output.txt
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 input.txt > output.txt
//! ```
//!
//! The program reads one JSON load request per line from the input file and
//! writes one JSON response per evaluated request, in input order.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `info` or `debug` to see decisions and window rollovers
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, malformed request line, I/O failure, etc.)

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use velocity_limits::cli;
use velocity_limits::strategy;
use velocity_limits::VelocityError;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), VelocityError> {
    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config)
    };

    let mut output: Box<dyn Write> = match &args.output_file {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    strategy.process(&args.input_file, output.as_mut())
}
