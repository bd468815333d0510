//! Synchronous line reader with iterator interface
//!
//! Provides a streaming iterator over load requests from a file with one JSON
//! object per line. Delegates format concerns to the json_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<LoadRequest, VelocityError>` for each non-blank line:
//!
//! ```no_run
//! use velocity_limits::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("input.txt")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(request) => println!("Processing load: {:?}", request),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors opening the file are returned from `new()`
//! - Read and parse errors are yielded as Err variants carrying the line number
//! - Blank lines are skipped but still counted

use crate::io::json_format::parse_line;
use crate::types::{LoadRequest, VelocityError};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::path::Path;

/// Synchronous line reader
#[derive(Debug)]
pub struct SyncReader {
    lines: Lines<BufReader<File>>,
    line_num: u64,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(VelocityError::FileNotFound)` if the path does not exist
    /// * `Err(VelocityError::IoError)` for any other open failure
    pub fn new(path: &Path) -> Result<Self, VelocityError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => VelocityError::file_not_found(path),
            _ => VelocityError::from(e),
        })?;

        Ok(Self {
            lines: BufReader::with_capacity(8 * 1024, file).lines(),
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<LoadRequest, VelocityError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_num += 1;

            let parsed = line
                .map_err(|e| VelocityError::unreadable_line(self.line_num, e))
                .and_then(|text| parse_line(&text, self.line_num));

            match parsed {
                Ok(Some(request)) => return Some(Ok(request)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
