use std::net::Ipv4Addr;

use crate::firmware::Firmware;

/// What a device says about itself in its status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceStatus {
    /// User-assigned label, empty when the device has none.
    pub name: String,
    pub firmware: Firmware,
}

/// A responder running the target firmware, as found by one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub address: Ipv4Addr,
    pub name: String,
    pub firmware_version: String,
    pub firmware_variant: String,
    /// Only meaningful after the device has been compared against the latest release.
    pub outdated: bool,
}

impl Device {
    pub fn new(address: Ipv4Addr, status: DeviceStatus) -> Self {
        Self {
            address,
            name: status.name,
            firmware_version: status.firmware.version,
            firmware_variant: status.firmware.variant,
            outdated: false,
        }
    }

    /// Name for log lines; falls back to the address for unnamed devices.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.address.to_string()
        } else {
            format!("{} ({})", self.name, self.address)
        }
    }
}
