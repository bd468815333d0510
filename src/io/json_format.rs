//! JSON line format for load requests and responses
//!
//! This module centralizes all wire format concerns:
//! - `LoadRecord` structure for deserializing one input line
//! - Conversion from a record to a validated `LoadRequest`
//! - Response serialization, one JSON object per line
//!
//! All functions are pure apart from writing to the supplied writer.
//!
//! Input lines look like:
//!
//! ```text
//! {"id":"15887","customer_id":"528","load_amount":"$3318.47","time":"2000-01-01T00:00:00Z"}
//! ```

use crate::types::{LoadRequest, LoadResponse, VelocityError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::Write;

/// Raw load request as it appears on one input line
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoadRecord {
    pub id: String,
    pub customer_id: String,
    pub load_amount: String,
    pub time: String,
}

/// Parse one input line into a load request
///
/// # Arguments
///
/// * `line` - The raw line, without its terminator
/// * `line_num` - 1-based line number used in error messages
///
/// # Returns
///
/// * `Ok(Some(LoadRequest))` - A valid request
/// * `Ok(None)` - The line is blank
/// * `Err(VelocityError)` - The line is malformed
pub fn parse_line(line: &str, line_num: u64) -> Result<Option<LoadRequest>, VelocityError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let record: LoadRecord = serde_json::from_str(line)
        .map_err(|e| VelocityError::parse(line_num, e.to_string()))?;

    convert_load_record(record, line_num).map(Some)
}

/// Convert a LoadRecord to a LoadRequest
///
/// The amount may carry a `$` sign and must be a finite, non-negative number.
/// The time must be RFC 3339 and is normalized to UTC.
pub fn convert_load_record(record: LoadRecord, line_num: u64) -> Result<LoadRequest, VelocityError> {
    let amount = parse_amount(&record.load_amount)
        .ok_or_else(|| VelocityError::invalid_amount(line_num, &record.load_amount))?;

    let time = parse_time(&record.time)
        .ok_or_else(|| VelocityError::invalid_time(line_num, &record.time))?;

    Ok(LoadRequest {
        id: record.id,
        customer_id: record.customer_id,
        amount,
        time,
    })
}

fn parse_amount(raw: &str) -> Option<f64> {
    let amount: f64 = raw.trim().trim_matches('$').parse().ok()?;
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Write a single response as one JSON line
pub fn write_response(response: &LoadResponse, output: &mut dyn Write) -> Result<(), VelocityError> {
    serde_json::to_writer(&mut *output, response)
        .map_err(|e| VelocityError::IoError {
            message: format!("Failed to write response: {}", e),
        })?;
    writeln!(output)?;
    Ok(())
}
