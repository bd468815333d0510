//! Per-request load processing
//!
//! This module provides the `LoadProcessor` struct, which carries one load
//! request through the registry and its account:
//!
//! 1. Skip the request if its `(id, customer_id)` pair was already processed
//! 2. Fetch or create the customer's account
//! 3. Evaluate the load against the account's limits while holding its lock
//! 4. Record the pair as processed
//!
//! The processor is cheap to clone and can be shared across tasks. Both
//! processing strategies use it, each with its own registry implementation.

use super::traits::AccountRegistry;
use crate::types::{LimitEvent, LimitObserver, LoadRequest, LoadResponse};
use std::sync::{Arc, PoisonError};

/// Load processor over a shared registry and observer
pub struct LoadProcessor<R: AccountRegistry> {
    registry: Arc<R>,
    observer: Arc<dyn LimitObserver>,
}

impl<R: AccountRegistry> Clone for LoadProcessor<R> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            observer: Arc::clone(&self.observer),
        }
    }
}

impl<R: AccountRegistry> LoadProcessor<R> {
    /// Create a new LoadProcessor
    ///
    /// # Arguments
    ///
    /// * `registry` - Arc-wrapped registry owning all accounts
    /// * `observer` - Receiver for decisions made while processing
    pub fn new(registry: Arc<R>, observer: Arc<dyn LimitObserver>) -> Self {
        Self { registry, observer }
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    /// Process a single load request
    ///
    /// # Returns
    ///
    /// * `Some(LoadResponse)` - The request was evaluated (accepted or rejected)
    /// * `None` - The request is a duplicate and was ignored
    pub fn process(&self, request: &LoadRequest) -> Option<LoadResponse> {
        if self
            .registry
            .is_duplicate_transaction(&request.id, &request.customer_id)
        {
            self.observer.notify(LimitEvent::DuplicateIgnored {
                id: request.id.clone(),
                customer_id: request.customer_id.clone(),
            });
            return None;
        }

        let account = self.registry.get_or_create_account(&request.customer_id);
        let accepted = account
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .load_funds(request, self.observer.as_ref());

        self.registry
            .record_transaction(&request.id, &request.customer_id);

        Some(LoadResponse::new(request, accepted))
    }
}
