//! Observer implementations
//!
//! - [`LogObserver`] forwards events to the `log` facade (used by the binary)
//! - [`NoopObserver`] discards everything
//! - [`RecordingObserver`] keeps events in memory so callers can inspect them

use crate::types::{LimitEvent, LimitObserver};
use log::{debug, info, warn};
use std::sync::{Mutex, PoisonError};

/// Observer that writes every event through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl LimitObserver for LogObserver {
    fn notify(&self, event: LimitEvent) {
        match event {
            LimitEvent::DailyLimitCreated {
                customer_id,
                window_start,
            } => debug!(
                "Customer {}: daily limit created for window {}",
                customer_id, window_start
            ),
            LimitEvent::WeeklyLimitCreated {
                customer_id,
                window_start,
            } => debug!(
                "Customer {}: weekly limit created for window {}",
                customer_id, window_start
            ),
            LimitEvent::DailyWindowRolled {
                customer_id,
                previous,
                current,
            } => debug!(
                "Customer {}: daily window rolled from {} to {}",
                customer_id, previous, current
            ),
            LimitEvent::WeeklyWindowRolled {
                customer_id,
                previous,
                current,
            } => debug!(
                "Customer {}: weekly window rolled from {} to {}",
                customer_id, previous, current
            ),
            LimitEvent::Accepted {
                id,
                customer_id,
                amount,
            } => info!("Load {} for customer {} accepted ({})", id, customer_id, amount),
            LimitEvent::Rejected {
                id,
                customer_id,
                reason,
            } => info!("Load {} for customer {} rejected: {}", id, customer_id, reason),
            LimitEvent::DuplicateIgnored { id, customer_id } => {
                warn!("Ignoring duplicate load {} for customer {}", id, customer_id)
            }
        }
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LimitObserver for NoopObserver {
    fn notify(&self, _event: LimitEvent) {}
}

/// Observer that records events in arrival order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<LimitEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event received so far
    pub fn events(&self) -> Vec<LimitEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LimitObserver for RecordingObserver {
    fn notify(&self, event: LimitEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
