//! Status probe against a single address.
//!
//! One `Status 0` request decides whether the address hosts an update target.
//! The outcome is typed: [`ProbeError::Unreachable`] when nothing usable
//! answered, [`ProbeError::Incompatible`] when something answered that is not
//! our firmware.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fwscan_common::{
    device::{Device, DeviceStatus},
    error::{ProbeError, TransportError},
    firmware,
};
use serde::Deserialize;
use tokio::time::timeout;

use super::Prober;
use crate::network::{command, transport::HttpTransport};

#[derive(Debug, Deserialize)]
struct StatusReport {
    #[serde(rename = "Status")]
    status: Option<StatusSection>,
    #[serde(rename = "StatusFWR")]
    firmware: Option<FirmwareSection>,
}

#[derive(Debug, Deserialize)]
struct StatusSection {
    #[serde(rename = "DeviceName", default)]
    device_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirmwareSection {
    #[serde(rename = "Version")]
    version: String,
}

pub struct DeviceProber {
    transport: Arc<dyn HttpTransport>,
    password: Option<String>,
    timeout: Duration,
}

impl DeviceProber {
    pub fn new(transport: Arc<dyn HttpTransport>, password: Option<String>, timeout: Duration) -> Self {
        Self {
            transport,
            password,
            timeout,
        }
    }
}

#[async_trait]
impl Prober for DeviceProber {
    async fn probe(&self, addr: Ipv4Addr) -> Result<Device, ProbeError> {
        let url = command::status_url(addr, self.password.as_deref());

        let body = match timeout(self.timeout, self.transport.get(&url)).await {
            Ok(res) => res?,
            Err(_elapsed) => return Err(TransportError::Timeout { url }.into()),
        };

        let status = parse_status(&body)?;
        Ok(Device::new(addr, status))
    }
}

/// Extracts device name and firmware from a `Status 0` JSON body.
pub fn parse_status(body: &str) -> Result<DeviceStatus, ProbeError> {
    let report: StatusReport = serde_json::from_str(body)
        .map_err(|e| ProbeError::incompatible(format!("status body is not a status report: {e}")))?;

    let version = report
        .firmware
        .map(|fw| fw.version)
        .ok_or_else(|| ProbeError::incompatible("status report has no StatusFWR.Version"))?;

    let name = report
        .status
        .and_then(|s| s.device_name)
        .unwrap_or_default();

    Ok(DeviceStatus {
        name,
        firmware: firmware::parse_firmware(&version)?,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
