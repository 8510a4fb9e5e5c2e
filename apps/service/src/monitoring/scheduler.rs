use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info};

use super::checker::EndpointChecker;
use super::types::{CheckResult, Endpoint};
use crate::bus;

/// Fan-out scheduler - runs one full check cycle over the endpoint registry
pub struct CycleRunner {
    checker: Arc<EndpointChecker>,
}

impl CycleRunner {
    pub fn new(checker: Arc<EndpointChecker>) -> Self {
        Self { checker }
    }

    /// Run one cycle: emit placeholders, probe every endpoint concurrently,
    /// and publish the settled batch. Returns one result per input endpoint,
    /// in input order.
    pub async fn run_cycle(&self, endpoints: &[Endpoint]) -> Vec<CheckResult> {
        let placeholders: Vec<CheckResult> =
            endpoints.iter().map(CheckResult::checking).collect();
        bus::publish_checking(placeholders.clone());

        // Endpoint count is small and fixed; concurrency is unbounded
        let handles: Vec<_> = endpoints
            .iter()
            .map(|endpoint| {
                let checker = self.checker.clone();
                let endpoint = endpoint.clone();
                tokio::spawn(async move { checker.check(&endpoint).await })
            })
            .collect();

        let mut results = Vec::with_capacity(endpoints.len());
        for (joined, placeholder) in join_all(handles).await.into_iter().zip(placeholders) {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => {
                    // A checker task must not panic; degrade rather than
                    // abort the batch if one ever does
                    error!(endpoint = %placeholder.endpoint, "check task panicked: {e}");
                    results.push(placeholder.offline(0));
                }
            }
        }

        let offline =
            results.iter().filter(|r| r.status == super::types::EndpointStatus::Offline).count();
        info!(total = results.len(), offline, "check cycle settled");

        bus::publish_batch(results.clone());
        results
    }
}
