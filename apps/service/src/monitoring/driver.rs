use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use super::scheduler::CycleRunner;
use super::types::Endpoint;

enum Command {
    Trigger,
    Shutdown,
}

/// Periodic driver - owns the repeating-cycle timer and the manual trigger
/// entry point.
///
/// Cycles are not serialized: a manual trigger while a scheduled cycle is
/// still in flight runs both concurrently, and consumers observe whichever
/// batch settles last (last-writer-wins).
pub struct PeriodicDriver {
    runner: Arc<CycleRunner>,
    endpoints: Arc<Vec<Endpoint>>,
    cadence: Duration,
}

/// Handle to a running driver task
pub struct DriverHandle {
    command_tx: mpsc::Sender<Command>,
    task: tokio::task::JoinHandle<()>,
}

impl PeriodicDriver {
    pub fn new(runner: Arc<CycleRunner>, endpoints: Vec<Endpoint>, cadence: Duration) -> Self {
        Self { runner, endpoints: Arc::new(endpoints), cadence }
    }

    /// Spawn the driver task. The first cycle starts immediately.
    pub fn start(self) -> DriverHandle {
        let (command_tx, mut command_rx) = mpsc::channel::<Command>(8);

        let task = tokio::spawn(async move {
            let mut timer = interval(self.cadence);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        self.launch_cycle("timer");
                    }
                    command = command_rx.recv() => match command {
                        Some(Command::Trigger) => self.launch_cycle("manual"),
                        Some(Command::Shutdown) | None => {
                            // Cancel the timer only; in-flight cycles settle
                            // on their own probe deadlines
                            info!("periodic driver stopping");
                            break;
                        }
                    }
                }
            }
        });

        DriverHandle { command_tx, task }
    }

    fn launch_cycle(&self, reason: &'static str) {
        debug!(reason, endpoints = self.endpoints.len(), "launching check cycle");
        let runner = self.runner.clone();
        let endpoints = self.endpoints.clone();
        tokio::spawn(async move {
            let _ = runner.run_cycle(&endpoints).await;
        });
    }
}

impl DriverHandle {
    /// Start a cycle now, regardless of the timer. Overlap with a running
    /// cycle is tolerated.
    pub async fn trigger_now(&self) {
        let _ = self.command_tx.send(Command::Trigger).await;
    }

    /// Stop the recurring timer and wait for the driver task to exit
    pub async fn shutdown(self) {
        let _ = self.command_tx.send(Command::Shutdown).await;
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::StatusEvent;
    use crate::monitoring::checker::EndpointChecker;
    use crate::monitoring::probe::{ProbeOutcome, RpcProbe};
    use crate::monitoring::types::Network;

    struct InstantProbe;

    #[async_trait::async_trait]
    impl RpcProbe for InstantProbe {
        async fn call(&self, _url: &str, _method: &str, _deadline: Duration) -> ProbeOutcome {
            ProbeOutcome { result: Ok(serde_json::json!(7)), elapsed_ms: 5 }
        }
    }

    fn driver(cadence: Duration) -> PeriodicDriver {
        let checker = Arc::new(EndpointChecker::new(
            Arc::new(InstantProbe),
            Duration::from_millis(8000),
            Duration::from_millis(3000),
            2000,
        ));
        let endpoints = vec![Endpoint {
            provider: "driver-test".to_string(),
            network: Network::Testnet,
            url: "https://driver.test.invalid".to_string(),
        }];
        PeriodicDriver::new(Arc::new(CycleRunner::new(checker)), endpoints, cadence)
    }

    async fn wait_for_batch(rx: &mut tokio::sync::broadcast::Receiver<StatusEvent>) {
        loop {
            match rx.recv().await {
                Ok(StatusEvent::Batch(results))
                    if results.iter().any(|r| r.provider == "driver-test") =>
                {
                    return;
                }
                Ok(_) | Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                Err(e) => panic!("status bus closed: {e}"),
            }
        }
    }

    #[tokio::test]
    async fn test_first_cycle_runs_immediately() {
        let mut rx = crate::bus::subscribe();
        let handle = driver(Duration::from_secs(3600)).start();

        tokio::time::timeout(Duration::from_secs(5), wait_for_batch(&mut rx))
            .await
            .expect("no batch published for the initial cycle");

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_manual_trigger_starts_a_cycle() {
        let handle = driver(Duration::from_secs(3600)).start();
        let mut rx = crate::bus::subscribe();

        // Let the initial tick settle before subscribing to the triggered one
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.trigger_now().await;

        tokio::time::timeout(Duration::from_secs(5), wait_for_batch(&mut rx))
            .await
            .expect("no batch published for the manual trigger");

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_the_timer() {
        let handle = driver(Duration::from_millis(20)).start();
        tokio::time::sleep(Duration::from_millis(60)).await;
        handle.shutdown().await;
        // Returning from shutdown means the driver task exited
    }
}
