use std::time::{Duration, Instant};

use anyhow::Context;
use fwscan_common::{config::ScanConfig, network::range::Ipv4Range};
use fwscan_core::discovery::{DiscoveryService, ScanReport};
use fwscan_core::updater::UpdateOutcome;
use tracing::{Instrument, info, warn};

use crate::terminal::{print, progress};

pub async fn scan(service: &DiscoveryService, cfg: &ScanConfig) -> anyhow::Result<()> {
    print::header(&format!("scanning {}", cfg.cidr));

    let total: u64 = cfg.cidr.parse::<Ipv4Range>().map(|range| range.len()).unwrap_or(0);
    let span = progress::scan_span(total);
    let on_probe_done = progress::probe_callback(span.clone());

    let start_time: Instant = Instant::now();
    let report: ScanReport = service
        .perform_discovery(cfg, Some(on_probe_done))
        .instrument(span)
        .await
        .with_context(|| format!("scan of {} failed", cfg.cidr))?;

    scan_ends(&report, start_time.elapsed());

    if !cfg.do_updates {
        if report.outdated().next().is_some() {
            info!("Not updating any devices. Pass --do-updates or set FWSCAN_DOUPDATES=true to update them.");
        }
        return Ok(());
    }

    let outcomes: Vec<UpdateOutcome> = service.update_outdated(cfg, &report).await;
    updates_end(&outcomes);
    Ok(())
}

fn scan_ends(report: &ScanReport, total_time: Duration) {
    if report.devices.is_empty() {
        print::header("zero devices detected");
        print::no_results();
        return;
    }

    print::header(&format!("latest release {}", report.reference));
    print::device_table(&report.devices);
    print::summary(report, total_time);
}

fn updates_end(outcomes: &[UpdateOutcome]) {
    if outcomes.is_empty() {
        info!("Every device is up to date");
        return;
    }

    print::header("ota updates");
    print::update_results(outcomes);

    let failed = outcomes.iter().filter(|outcome| !outcome.succeeded()).count();
    if failed > 0 {
        warn!("{failed} of {} devices did not accept every update step", outcomes.len());
    }
}
