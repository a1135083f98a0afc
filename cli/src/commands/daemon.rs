use std::time::Duration;

use fwscan_common::config::ScanConfig;
use fwscan_core::discovery::DiscoveryService;
use tracing::{error, info};

use super::scan;

/// Runs a scan every `interval` until interrupted. A failed cycle is logged and
/// the next one is attempted on schedule.
pub async fn daemon(service: &DiscoveryService, cfg: &ScanConfig, interval: Duration) -> anyhow::Result<()> {
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = scan::scan(service, cfg) => {
                if let Err(e) = result {
                    error!("{e:#}");
                }
            }
            _ = &mut shutdown => break,
        }

        info!("Next scan in {}h", interval.as_secs() / 3600);

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = &mut shutdown => break,
        }
    }

    info!("Shutting down");
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let Ok(mut terminate) = signal(SignalKind::terminate()) else {
        let _ = tokio::signal::ctrl_c().await;
        return;
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = terminate.recv() => {}
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
