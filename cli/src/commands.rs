pub mod daemon;
pub mod scan;

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use fwscan_common::config::{self, ScanConfig};
use semver::Version;

pub const MAX_INTERVAL_HOURS: u64 = 24 * 365;

#[derive(Parser)]
#[command(name = "fwscan")]
#[command(version)]
#[command(about = "Finds Tasmota devices running outdated firmware and updates them over the air.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub scan: ScanArgs,

    /// Show more detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Show less output (-q warnings only, -qq errors only)
    #[arg(short, long, action = ArgAction::Count, global = true, conflicts_with = "verbose")]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the network once (default)
    #[command(alias = "s")]
    Scan,
    /// Scan the network periodically until stopped
    #[command(alias = "d")]
    Daemon {
        /// Hours between two scans (at most one year)
        #[arg(long, env = "FWSCAN_INTERVAL_HOURS", default_value_t = 24, value_parser = clap::value_parser!(u64).range(1..=MAX_INTERVAL_HOURS))]
        interval_hours: u64,
    },
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// Network to scan, in CIDR notation
    #[arg(long, env = "FWSCAN_CIDR", default_value = config::DEFAULT_CIDR, global = true)]
    pub cidr: String,

    /// Web password of the devices
    #[arg(long, env = "FWSCAN_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Directory the OTA images are served from
    #[arg(long, env = "FWSCAN_OTAURL", default_value = config::DEFAULT_OTA_URL, global = true)]
    pub ota_url: String,

    /// Trigger OTA updates on outdated devices
    #[arg(long, env = "FWSCAN_DOUPDATES", global = true)]
    pub do_updates: bool,

    /// Seconds to wait for a single device
    #[arg(long, env = "FWSCAN_TIMEOUT", default_value_t = config::DEFAULT_PROBE_TIMEOUT.as_secs(), global = true)]
    pub timeout: u64,

    /// Maximum number of devices probed at the same time
    #[arg(long, env = "FWSCAN_CONCURRENCY", default_value_t = config::DEFAULT_MAX_CONCURRENCY, global = true)]
    pub concurrency: usize,

    /// Compare against this version instead of the latest GitHub release
    #[arg(long, env = "FWSCAN_REFERENCE_VERSION", global = true)]
    pub reference_version: Option<Version>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Pause between two daemon cycles.
pub fn daemon_interval(interval_hours: u64) -> Duration {
    Duration::from_secs(interval_hours.clamp(1, MAX_INTERVAL_HOURS).saturating_mul(3600))
}

impl From<&ScanArgs> for ScanConfig {
    fn from(args: &ScanArgs) -> Self {
        Self {
            cidr: args.cidr.clone(),
            password: args.password.clone().filter(|pw| !pw.is_empty()),
            ota_url: args.ota_url.clone(),
            do_updates: args.do_updates,
            probe_timeout: Duration::from_secs(args.timeout.max(1)),
            max_concurrency: args.concurrency.max(1),
        }
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
