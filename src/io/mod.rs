//! I/O module
//!
//! Handles reading load requests and writing responses.
//!
//! # Components
//!
//! - `json_format` - JSON line format (request parsing, response serialization)
//! - `sync_reader` - Synchronous line reader with iterator interface
//! - `async_reader` - Asynchronous line reader with batch reading interface

pub mod async_reader;
pub mod json_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use json_format::{convert_load_record, parse_line, write_response, LoadRecord};
pub use sync_reader::SyncReader;
