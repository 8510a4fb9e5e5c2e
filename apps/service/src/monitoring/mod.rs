//! Health-check engine for the configured RPC endpoints.
//!
//! This module is responsible for:
//! - Issuing bounded JSON-RPC probes (liveness + best-effort enrichment)
//! - Classifying each endpoint as online/slow/offline
//! - Fanning out one check task per endpoint and collecting the batch
//! - Driving cycles on a cadence and on manual triggers
//! - Reducing batches into per-network summaries

pub mod aggregator;
pub mod checker;
pub mod driver;
pub mod probe;
pub mod scheduler;
pub mod types;

pub use aggregator::{NetworkSummary, summarize};
pub use checker::EndpointChecker;
pub use driver::{DriverHandle, PeriodicDriver};
pub use probe::{HttpRpcProbe, ProbeError, ProbeOutcome, RpcProbe};
pub use scheduler::CycleRunner;
pub use types::{CheckResult, Endpoint, EndpointStatus, Network};
