use std::time::Duration;

pub const DEFAULT_CIDR: &str = "192.168.0.0/24";
pub const DEFAULT_OTA_URL: &str = "http://ota.tasmota.com/tasmota/release/";
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_CONCURRENCY: usize = 256;

/// Settings for one scan. Read-only once the scan starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Network to sweep, in CIDR notation.
    pub cidr: String,
    /// Web password of the devices. Sent as `user=admin&password=...` when set.
    pub password: Option<String>,
    /// Directory the OTA images are served from; the image name is appended.
    pub ota_url: String,
    /// Trigger OTA updates on outdated devices after the scan.
    pub do_updates: bool,
    /// Upper bound for a single status request.
    pub probe_timeout: Duration,
    /// Upper bound for probes in flight at the same time.
    pub max_concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            cidr: DEFAULT_CIDR.to_string(),
            password: None,
            ota_url: DEFAULT_OTA_URL.to_string(),
            do_updates: false,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}
