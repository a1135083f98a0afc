//! Over-the-air updates for outdated devices.
//!
//! Each device gets two commands: point its OTA source at the matching
//! image, then start the upgrade. Both are always sent; a device that timed
//! out on the first may still have applied it. Devices are handled one after
//! another so the log reads device by device, and a failing device never
//! stops the rest.

use std::net::Ipv4Addr;
use std::sync::Arc;

use fwscan_common::{device::Device, error::UpdateStepError, firmware};
use tracing::{error, info, warn};

use crate::network::{command, transport::HttpTransport};

/// Image family every file name starts with (`tasmota.bin`, `tasmota-sensors.bin`).
pub const FIRMWARE_FAMILY: &str = "tasmota";

/// Full image URL for a build variant.
///
/// `prefix` already ends with the image family, e.g. `http://host/release/tasmota`.
pub fn firmware_url(prefix: &str, variant: &str) -> String {
    if firmware::is_default_variant(variant) {
        format!("{prefix}.bin")
    } else {
        format!("{prefix}-{variant}.bin")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub address: Ipv4Addr,
    pub name: String,
    pub firmware_url: String,
    /// One entry per failed step, in the order the steps were sent.
    pub errors: Vec<UpdateStepError>,
}

impl UpdateOutcome {
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct UpdateDispatcher {
    transport: Arc<dyn HttpTransport>,
    password: Option<String>,
    image_prefix: String,
}

impl UpdateDispatcher {
    /// `ota_url` is the directory the images are served from.
    pub fn new(transport: Arc<dyn HttpTransport>, password: Option<String>, ota_url: &str) -> Self {
        Self {
            transport,
            password,
            image_prefix: format!("{ota_url}{FIRMWARE_FAMILY}"),
        }
    }

    pub fn firmware_url_for(&self, device: &Device) -> String {
        firmware_url(&self.image_prefix, &device.firmware_variant)
    }

    /// Runs the OTA sequence on every outdated device, in order.
    pub async fn dispatch(&self, devices: &[Device]) -> Vec<UpdateOutcome> {
        let mut outcomes = Vec::new();

        for device in devices.iter().filter(|d| d.outdated) {
            let firmware_url = self.firmware_url_for(device);
            info!("Updating {} from {firmware_url}", device.label());

            let errors = self.update_device(device.address, &firmware_url).await;
            if errors.is_empty() {
                info!("Upgrade triggered on {}", device.label());
            }

            outcomes.push(UpdateOutcome {
                address: device.address,
                name: device.name.clone(),
                firmware_url,
                errors,
            });
        }

        outcomes
    }

    async fn update_device(&self, address: Ipv4Addr, firmware_url: &str) -> Vec<UpdateStepError> {
        let password = self.password.as_deref();
        let mut errors = Vec::new();

        let set_url = command::command_url(address, password, &command::ota_url_command(firmware_url));
        if let Err(source) = self.transport.get(&set_url).await {
            let e = UpdateStepError::SetOtaUrl { address, source };
            warn!("{e}");
            errors.push(e);
        }

        let trigger_url = command::command_url(address, password, command::UPGRADE_COMMAND);
        if let Err(source) = self.transport.get(&trigger_url).await {
            let e = UpdateStepError::Trigger { address, source };
            error!("{e}");
            errors.push(e);
        }

        errors
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
