use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Solana network variant an endpoint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Devnet,
    Testnet,
}

impl Network {
    /// All network variants, in presentation order
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Devnet, Network::Testnet];
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Devnet => write!(f, "devnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// One network-specific RPC URL for one provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    pub provider: String,
    pub network: Network,
    pub url: String,
}

/// Status of an endpoint check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointStatus {
    Online,
    Slow,
    Offline,
    /// Placeholder emitted before a cycle's probes resolve
    Checking,
}

impl std::fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointStatus::Online => write!(f, "online"),
            EndpointStatus::Slow => write!(f, "slow"),
            EndpointStatus::Offline => write!(f, "offline"),
            EndpointStatus::Checking => write!(f, "checking"),
        }
    }
}

/// Result of checking one endpoint in one cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Provider the endpoint belongs to
    pub provider: String,

    /// Network variant that was checked
    pub network: Network,

    /// URL that was probed
    pub endpoint: String,

    /// Outcome of the check
    pub status: EndpointStatus,

    /// Liveness call latency in milliseconds
    pub response_time_ms: Option<u64>,

    /// Block height from the enrichment call, when it succeeded
    pub block_height: Option<u64>,

    /// When the check completed
    pub checked_at: DateTime<Utc>,
}

impl CheckResult {
    /// Create a placeholder result for an endpoint whose probes have not resolved
    pub fn checking(endpoint: &Endpoint) -> Self {
        Self {
            provider: endpoint.provider.clone(),
            network: endpoint.network,
            endpoint: endpoint.url.clone(),
            status: EndpointStatus::Checking,
            response_time_ms: None,
            block_height: None,
            checked_at: Utc::now(),
        }
    }

    /// Mark the endpoint as online with the measured liveness latency
    pub fn online(mut self, response_time_ms: u64) -> Self {
        self.status = EndpointStatus::Online;
        self.response_time_ms = Some(response_time_ms);
        self.checked_at = Utc::now();
        self
    }

    /// Mark the endpoint as slow (responsive but over the latency threshold)
    pub fn slow(mut self, response_time_ms: u64) -> Self {
        self.status = EndpointStatus::Slow;
        self.response_time_ms = Some(response_time_ms);
        self.checked_at = Utc::now();
        self
    }

    /// Mark the endpoint as offline, keeping the time spent before failure
    pub fn offline(mut self, response_time_ms: u64) -> Self {
        self.status = EndpointStatus::Offline;
        self.response_time_ms = Some(response_time_ms);
        self.block_height = None;
        self.checked_at = Utc::now();
        self
    }

    /// Attach the block height from a successful enrichment call
    pub fn with_block_height(mut self, block_height: u64) -> Self {
        self.block_height = Some(block_height);
        self
    }
}
