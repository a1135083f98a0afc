//! # Firmware Discovery Service
//!
//! Implements the "find outdated devices" use case.
//!
//! One run parses the target range, establishes the latest release, sweeps the
//! range and classifies every device found. Updating is a separate step so the
//! caller can show the results before any device is touched.

use std::sync::Arc;

use fwscan_common::{
    config::ScanConfig,
    device::Device,
    error::ScanError,
    network::range::Ipv4Range,
};
use semver::Version;
use tracing::info;

use crate::network::transport::HttpTransport;
use crate::reconciler::{self, SkippedDevice};
use crate::release::ReleaseFeed;
use crate::scanner::{self, DeviceProber, ProbeStats, ProgressCallback};
use crate::updater::{UpdateDispatcher, UpdateOutcome};

/// Everything one run found out.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub reference: Version,
    /// Sorted by ascending address.
    pub devices: Vec<Device>,
    pub stats: ProbeStats,
    pub skipped: Vec<SkippedDevice>,
}

impl ScanReport {
    pub fn outdated(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(|d| d.outdated)
    }
}

/// Application service for firmware discovery.
///
/// Orchestrates a run by:
/// 1. asking the [`ReleaseFeed`] for the reference version.
/// 2. delegating the sweep to [`scanner::scan_range`].
/// 3. flagging outdated devices with [`reconciler::reconcile`].
pub struct DiscoveryService {
    transport: Arc<dyn HttpTransport>,
    feed: Box<dyn ReleaseFeed>,
}

impl DiscoveryService {
    pub fn new(transport: Arc<dyn HttpTransport>, feed: Box<dyn ReleaseFeed>) -> Self {
        Self { transport, feed }
    }

    /// Executes one scan as configured by `cfg`.
    ///
    /// Fails only when the range is invalid or the reference version cannot be
    /// established. Unreachable and incompatible hosts are simply absent.
    pub async fn perform_discovery(
        &self,
        cfg: &ScanConfig,
        on_probe_done: Option<ProgressCallback>,
    ) -> Result<ScanReport, ScanError> {
        let range: Ipv4Range = cfg.cidr.parse()?;
        let reference: Version = self.feed.latest_version().await?;

        let prober = DeviceProber::new(
            self.transport.clone(),
            cfg.password.clone(),
            cfg.probe_timeout,
        );
        let outcome =
            scanner::scan_range(range, Arc::new(prober), cfg.max_concurrency, on_probe_done).await;

        let mut devices = outcome.devices;
        let skipped = reconciler::reconcile(&mut devices, &reference);

        let report = ScanReport {
            reference,
            devices,
            stats: outcome.stats,
            skipped,
        };
        info!(
            "{} devices found, {} outdated (latest release {})",
            report.devices.len(),
            report.outdated().count(),
            report.reference
        );

        Ok(report)
    }

    /// Triggers OTA updates on the outdated devices of `report`.
    pub async fn update_outdated(&self, cfg: &ScanConfig, report: &ScanReport) -> Vec<UpdateOutcome> {
        let dispatcher = UpdateDispatcher::new(self.transport.clone(), cfg.password.clone(), &cfg.ota_url);
        dispatcher.dispatch(&report.devices).await
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
