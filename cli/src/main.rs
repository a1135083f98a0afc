mod commands;
mod terminal;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use commands::{CommandLine, Commands, daemon, daemon_interval, scan};
use fwscan_common::config::ScanConfig;
use fwscan_core::discovery::DiscoveryService;
use fwscan_core::network::transport::{HttpTransport, ReqwestTransport};
use fwscan_core::release::{FixedRelease, GithubTags, ReleaseFeed};
use semver::Version;
use terminal::{logging, print};

const RELEASE_FEED_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet);
    print::banner(commands.quiet);

    let cfg = ScanConfig::from(&commands.scan);
    let service = build_service(&cfg, commands.scan.reference_version.clone())?;

    match commands.command.unwrap_or(Commands::Scan) {
        Commands::Scan => scan::scan(&service, &cfg).await,
        Commands::Daemon { interval_hours } => {
            daemon::daemon(&service, &cfg, daemon_interval(interval_hours)).await
        }
    }
}

/// Devices are reached directly; only the release lookup honours proxy settings.
fn build_service(cfg: &ScanConfig, reference: Option<Version>) -> anyhow::Result<DiscoveryService> {
    let devices: Arc<dyn HttpTransport> = Arc::new(
        ReqwestTransport::direct(cfg.probe_timeout).context("could not set up the device HTTP client")?,
    );

    let feed: Box<dyn ReleaseFeed> = match reference {
        Some(version) => Box::new(FixedRelease(version)),
        None => {
            let github = ReqwestTransport::new(RELEASE_FEED_TIMEOUT).context("could not set up the GitHub HTTP client")?;
            Box::new(GithubTags::upstream(Arc::new(github)))
        }
    };

    Ok(DiscoveryService::new(devices, feed))
}
