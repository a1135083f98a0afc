//! The scan coordinator.
//!
//! Every address of the range gets its own task, spawned as soon as a
//! concurrency permit is free. Tasks report their outcome
//! over a channel to a single collector, which is the only place results are
//! accumulated. The collector returns once every task has reported; results
//! are then sorted by address, because arrival order depends on per-host
//! latency and is different on every run.

use std::net::Ipv4Addr;
use std::sync::Arc;

use async_trait::async_trait;
use fwscan_common::{device::Device, error::ProbeError, network::range::Ipv4Range};
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, info, trace};

pub mod prober;

pub use prober::DeviceProber;

const RESULT_CHANNEL_CAPACITY: usize = 1024;

/// Called after every finished probe with `(finished, total)`.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Decides whether an address hosts an update target.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, addr: Ipv4Addr) -> Result<Device, ProbeError>;
}

/// How the probes of one scan ended.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProbeStats {
    pub probed: usize,
    pub found: usize,
    pub unreachable: usize,
    pub incompatible: usize,
}

impl ProbeStats {
    fn record(&mut self, outcome: &Result<Device, ProbeError>) {
        self.probed += 1;
        match outcome {
            Ok(_) => self.found += 1,
            Err(ProbeError::Unreachable(_)) => self.unreachable += 1,
            Err(ProbeError::Incompatible { .. }) => self.incompatible += 1,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ScanOutcome {
    /// Sorted by ascending address.
    pub devices: Vec<Device>,
    pub stats: ProbeStats,
}

/// Probes every address of `range` and returns the devices found.
///
/// At most `max_concurrency` probes are in flight at once. Failed probes are
/// counted in [`ProbeStats`] and otherwise dropped.
pub async fn scan_range(
    range: Ipv4Range,
    prober: Arc<dyn Prober>,
    max_concurrency: usize,
    on_probe_done: Option<ProgressCallback>,
) -> ScanOutcome {
    let total: usize = usize::try_from(range.len()).unwrap_or(usize::MAX);
    info!("Starting scan of {total} addresses ({} - {})", range.start_addr, range.end_addr);

    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let (tx, mut rx) = mpsc::channel::<(Ipv4Addr, Result<Device, ProbeError>)>(RESULT_CHANNEL_CAPACITY);

    // A probe task is only spawned once it holds a permit, so live tasks stay
    // bounded by the cap. The collector below drains while this runs.
    tokio::spawn(async move {
        for addr in range.iter() {
            // Collector gone: the scan was abandoned.
            if tx.is_closed() {
                return;
            }
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                return;
            };
            let tx = tx.clone();
            let prober = prober.clone();

            tokio::spawn(async move {
                let outcome = prober.probe(addr).await;
                let _ = tx.send((addr, outcome)).await;
                drop(permit);
            });
        }
    });

    let mut outcome = ScanOutcome::default();
    while let Some((addr, result)) = rx.recv().await {
        outcome.stats.record(&result);

        match result {
            Ok(device) => {
                debug!(
                    "Found {} running {}({})",
                    device.label(),
                    device.firmware_version,
                    device.firmware_variant
                );
                outcome.devices.push(device);
            }
            Err(e @ ProbeError::Incompatible { .. }) => debug!("Skipping {addr}: {e}"),
            Err(e) => trace!("Skipping {addr}: {e}"),
        }

        if let Some(cb) = &on_probe_done {
            cb(outcome.stats.probed, total);
        }
    }

    outcome.devices.sort_by_key(|device| device.address);

    info!(
        found = outcome.stats.found,
        unreachable = outcome.stats.unreachable,
        incompatible = outcome.stats.incompatible,
        "Scan finished"
    );
    outcome
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
