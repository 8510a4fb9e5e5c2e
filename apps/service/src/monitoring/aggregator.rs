use serde::Serialize;

use super::types::{CheckResult, EndpointStatus, Network};

/// Per-network roll-up of one settled batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    pub online: usize,
    pub slow: usize,
    pub offline: usize,
    pub total: usize,
    /// round(100 * (online + slow) / total); 0 for an empty network
    pub health_percent: u8,
}

/// Reduce a batch to one network's summary. Pure: depends only on the
/// given results. Results still in the checking state count toward the
/// total but no health bucket.
pub fn summarize(results: &[CheckResult], network: Network) -> NetworkSummary {
    let mut online = 0;
    let mut slow = 0;
    let mut offline = 0;
    let mut total = 0;

    for result in results.iter().filter(|r| r.network == network) {
        total += 1;
        match result.status {
            EndpointStatus::Online => online += 1,
            EndpointStatus::Slow => slow += 1,
            EndpointStatus::Offline => offline += 1,
            EndpointStatus::Checking => {}
        }
    }

    let health_percent = if total == 0 {
        0
    } else {
        (100.0 * (online + slow) as f64 / total as f64).round() as u8
    };

    NetworkSummary { online, slow, offline, total, health_percent }
}
