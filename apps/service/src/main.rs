mod bus;
mod config;
mod monitoring;
mod registry;
mod validation;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing::info;

use crate::bus::StatusEvent;
use crate::monitoring::{
    CheckResult, CycleRunner, EndpointChecker, HttpRpcProbe, Network, PeriodicDriver, summarize,
};

/// Solana RPC endpoint health monitor
#[derive(Debug, Parser)]
#[command(name = "rpcwatch", version)]
struct Cli {
    /// Path to the config file (defaults to ~/.config/rpcwatch/config.toml)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Run a single check cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();

    let cli = Cli::parse();
    let config = config::Config::from_config(cli.config.as_ref())
        .map_err(|e| anyhow!("failed to load config: {e:?}"))?;
    info!("\n{config}");

    let providers = registry::default_providers();
    for provider in &providers {
        tracing::debug!(provider = provider.name, website = provider.website, "provider registered");
    }
    let endpoints = validation::retain_valid(registry::endpoints(&providers));
    info!(endpoints = endpoints.len(), "registry loaded");

    let probe = Arc::new(HttpRpcProbe::new()?);
    let checker = Arc::new(EndpointChecker::new(
        probe,
        Duration::from_millis(config.monitoring.primary_timeout_ms),
        Duration::from_millis(config.monitoring.secondary_timeout_ms),
        config.monitoring.slow_threshold_ms,
    ));
    let runner = Arc::new(CycleRunner::new(checker));

    if cli.once {
        let results = runner.run_cycle(&endpoints).await;
        log_summaries(&results);
        return Ok(());
    }

    let mut rx = bus::subscribe();
    let driver = PeriodicDriver::new(
        runner,
        endpoints,
        Duration::from_secs(config.monitoring.interval_seconds),
    )
    .start();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown requested");
                break;
            }
            event = rx.recv() => match event {
                Ok(StatusEvent::Batch(results)) => log_summaries(&results),
                Ok(StatusEvent::Checking(_)) => {}
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    driver.shutdown().await;
    Ok(())
}

fn log_summaries(results: &[CheckResult]) {
    for network in Network::ALL {
        let summary = summarize(results, network);
        if summary.total > 0 {
            info!(
                network = %network,
                online = summary.online,
                slow = summary.slow,
                offline = summary.offline,
                health_percent = summary.health_percent,
                "network summary"
            );
        }
    }
}
