//! Batch processing with customer-based partitioning for async load processing
//!
//! This module provides the `BatchProcessor` struct, which processes a batch of
//! load requests concurrently while keeping each customer's loads in their
//! original order.
//!
//! # Design
//!
//! Limit budgets are order-sensitive: evaluating a customer's loads out of
//! order can change which of them are accepted. The processor therefore
//! partitions a batch by customer ID and runs one task per customer. Each task
//! works through its customer's loads sequentially, while different customers
//! proceed in parallel.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── LoadProcessor<ConcurrentRegistry>  (shared, cloneable)
//! ```

use std::collections::HashMap;

use super::ConcurrentRegistry;
use crate::core::LoadProcessor;
use crate::types::{CustomerId, LoadRequest, LoadResponse, VelocityError};

/// A load request tagged with its position in the batch
pub type IndexedRequest = (usize, LoadRequest);

/// Batch processor with customer-based partitioning
#[derive(Clone)]
pub struct BatchProcessor {
    processor: LoadProcessor<ConcurrentRegistry>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `processor` - Load processor backed by a shared concurrent registry
    pub fn new(processor: LoadProcessor<ConcurrentRegistry>) -> Self {
        Self { processor }
    }

    /// Partition a batch of requests by customer ID
    ///
    /// Each request keeps its index within the batch so results can be put
    /// back into input order afterwards.
    ///
    /// # Guarantees
    ///
    /// - Each request appears in exactly one partition
    /// - Requests for each customer keep their original order
    pub fn partition_by_customer(
        &self,
        batch: Vec<LoadRequest>,
    ) -> HashMap<CustomerId, Vec<IndexedRequest>> {
        let mut partitions: HashMap<CustomerId, Vec<IndexedRequest>> = HashMap::new();

        for (index, request) in batch.into_iter().enumerate() {
            partitions
                .entry(request.customer_id.clone())
                .or_default()
                .push((index, request));
        }

        partitions
    }

    /// Process one customer's requests sequentially
    ///
    /// # Returns
    ///
    /// The response for every evaluated request, tagged with its batch index.
    /// Duplicates produce no entry.
    pub async fn process_customer_requests(
        &self,
        requests: Vec<IndexedRequest>,
    ) -> Vec<(usize, LoadResponse)> {
        requests
            .into_iter()
            .filter_map(|(index, request)| {
                self.processor
                    .process(&request)
                    .map(|response| (index, response))
            })
            .collect()
    }

    /// Process a batch of requests with customer-based partitioning
    ///
    /// This method:
    /// 1. Partitions the batch by customer ID
    /// 2. Spawns a tokio task per customer
    /// 3. Waits for all tasks to complete
    /// 4. Returns the responses in the order the requests appeared in the batch
    ///
    /// # Errors
    ///
    /// Returns `VelocityError::RuntimeError` if a worker task panicked.
    pub async fn process_batch(
        &self,
        batch: Vec<LoadRequest>,
    ) -> Result<Vec<LoadResponse>, VelocityError> {
        let partitions = self.partition_by_customer(batch);

        let mut tasks = Vec::with_capacity(partitions.len());
        for (_customer_id, requests) in partitions {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_customer_requests(requests).await
            }));
        }

        let mut responses = Vec::new();
        for task in tasks {
            let customer_responses = task
                .await
                .map_err(|e| VelocityError::runtime(format!("worker task failed: {}", e)))?;
            responses.extend(customer_responses);
        }

        responses.sort_unstable_by_key(|(index, _)| *index);
        Ok(responses.into_iter().map(|(_, response)| response).collect())
    }
}
