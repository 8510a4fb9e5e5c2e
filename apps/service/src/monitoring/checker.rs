use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::probe::RpcProbe;
use super::types::{CheckResult, Endpoint};

/// Liveness call whose outcome decides online/slow/offline
const LIVENESS_METHOD: &str = "getSlot";

/// Best-effort enrichment call; never authoritative for status
const ENRICHMENT_METHOD: &str = "getBlockHeight";

/// Endpoint checker - runs the two-stage probe against one endpoint and
/// classifies the outcome
pub struct EndpointChecker {
    probe: Arc<dyn RpcProbe>,
    primary_deadline: Duration,
    secondary_deadline: Duration,
    slow_threshold_ms: u64,
}

impl EndpointChecker {
    pub fn new(
        probe: Arc<dyn RpcProbe>,
        primary_deadline: Duration,
        secondary_deadline: Duration,
        slow_threshold_ms: u64,
    ) -> Self {
        Self { probe, primary_deadline, secondary_deadline, slow_threshold_ms }
    }

    /// Check one endpoint. Infallible by contract: every probe failure is
    /// folded into the returned status.
    pub async fn check(&self, endpoint: &Endpoint) -> CheckResult {
        let result = CheckResult::checking(endpoint);

        let primary =
            self.probe.call(&endpoint.url, LIVENESS_METHOD, self.primary_deadline).await;

        let response_time_ms = primary.elapsed_ms;

        if let Err(error) = &primary.result {
            debug!(
                provider = %endpoint.provider,
                network = %endpoint.network,
                %error,
                "liveness probe failed"
            );
            return result.offline(response_time_ms);
        }

        // Enrichment runs only for a responsive endpoint; its failure is
        // swallowed and must never downgrade the status
        let mut result = if response_time_ms > self.slow_threshold_ms {
            result.slow(response_time_ms)
        } else {
            result.online(response_time_ms)
        };

        let secondary =
            self.probe.call(&endpoint.url, ENRICHMENT_METHOD, self.secondary_deadline).await;

        match secondary.result {
            Ok(value) => {
                if let Some(height) = value.as_u64() {
                    result = result.with_block_height(height);
                }
            }
            Err(error) => {
                debug!(
                    provider = %endpoint.provider,
                    network = %endpoint.network,
                    %error,
                    "enrichment probe failed, continuing without block height"
                );
            }
        }

        result
    }
}
