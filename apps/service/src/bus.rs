use tokio::sync::broadcast;
use tracing::debug;

use crate::monitoring::types::CheckResult;

/// Events published by the check engine for presentation consumers
#[derive(Debug, Clone)]
pub enum StatusEvent {
    /// Placeholder batch emitted when a cycle starts
    Checking(Vec<CheckResult>),
    /// Settled batch emitted when every probe in a cycle has resolved
    Batch(Vec<CheckResult>),
}

static BUS_TX: std::sync::OnceLock<broadcast::Sender<StatusEvent>> = std::sync::OnceLock::new();

fn bus() -> &'static broadcast::Sender<StatusEvent> {
    BUS_TX.get_or_init(|| {
        let (tx, _rx) = broadcast::channel::<StatusEvent>(64);
        tx
    })
}

pub fn subscribe() -> broadcast::Receiver<StatusEvent> {
    bus().subscribe()
}

pub fn publish_checking(placeholders: Vec<CheckResult>) {
    debug!(count = placeholders.len(), "status bus: publishing checking placeholders");
    publish(StatusEvent::Checking(placeholders));
}

pub fn publish_batch(results: Vec<CheckResult>) {
    debug!(count = results.len(), "status bus: publishing settled batch");
    publish(StatusEvent::Batch(results));
}

fn publish(ev: StatusEvent) {
    // Ignore errors if there are no receivers
    let _ = bus().send(ev);
}
