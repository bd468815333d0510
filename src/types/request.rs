//! Load request and response types
//!
//! A [`LoadRequest`] is a parsed "load funds" instruction for one customer.
//! The engine answers each evaluated request with a [`LoadResponse`].

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Customer identifier as it appears in the input
pub type CustomerId = String;

/// Load identifier, unique per customer
pub type TransactionId = String;

/// A parsed load funds request
///
/// The amount and time have already been validated by the reader: the amount
/// is finite and non-negative, and the time is normalized to UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    /// Load identifier used for duplicate detection
    pub id: TransactionId,

    /// The customer whose account receives the funds
    pub customer_id: CustomerId,

    /// Amount to load
    pub amount: f64,

    /// When the load was requested
    pub time: DateTime<Utc>,
}

/// Decision for a single evaluated load request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadResponse {
    pub id: TransactionId,
    pub customer_id: CustomerId,
    pub accepted: bool,
}

impl LoadResponse {
    /// Build the response for `request`
    pub fn new(request: &LoadRequest, accepted: bool) -> Self {
        LoadResponse {
            id: request.id.clone(),
            customer_id: request.customer_id.clone(),
            accepted,
        }
    }
}
