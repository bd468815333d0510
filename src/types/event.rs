//! Observable decisions made while evaluating loads
//!
//! Accounts and processors report what they decide through a
//! [`LimitObserver`] instead of writing to a logger directly. The binary wires
//! in an observer that forwards to `log`; tests record the events and assert on
//! them.

use super::error::Rejection;
use super::request::{CustomerId, TransactionId};
use chrono::{DateTime, Utc};

/// Something noteworthy that happened while a load was evaluated
#[derive(Debug, Clone, PartialEq)]
pub enum LimitEvent {
    /// The account had no daily limit yet and one was created
    DailyLimitCreated {
        customer_id: CustomerId,
        window_start: DateTime<Utc>,
    },

    /// The account had no weekly limit yet and one was created
    WeeklyLimitCreated {
        customer_id: CustomerId,
        window_start: DateTime<Utc>,
    },

    /// A load dated in a later day replaced the daily limit
    DailyWindowRolled {
        customer_id: CustomerId,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    /// A load dated in a later week replaced the weekly limit
    WeeklyWindowRolled {
        customer_id: CustomerId,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    /// The load passed both limits and was applied
    Accepted {
        id: TransactionId,
        customer_id: CustomerId,
        amount: f64,
    },

    /// The load was declined
    Rejected {
        id: TransactionId,
        customer_id: CustomerId,
        reason: Rejection,
    },

    /// The `(id, customer_id)` pair was seen before; the load was skipped
    DuplicateIgnored {
        id: TransactionId,
        customer_id: CustomerId,
    },
}

/// Receiver for [`LimitEvent`]s
///
/// Observers are shared between worker tasks, so implementations must be
/// thread-safe.
pub trait LimitObserver: Send + Sync {
    fn notify(&self, event: LimitEvent);
}
