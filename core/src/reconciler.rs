//! Compares discovered devices against the latest release.

use std::net::Ipv4Addr;

use fwscan_common::{device::Device, error::VersionParseError, firmware};
use semver::Version;
use tracing::warn;

/// A device whose version could not be compared. It stays `outdated == false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDevice {
    pub address: Ipv4Addr,
    pub error: VersionParseError,
}

/// `true` when `device_version` is strictly older than `reference`.
pub fn is_outdated(device_version: &str, reference: &Version) -> Result<bool, VersionParseError> {
    let version = firmware::parse_version(device_version)?;
    Ok(version < *reference)
}

/// Sets `outdated` on every device with a comparable version.
///
/// Devices with unparsable versions are left alone and returned, so one bad
/// self-report never fails the batch.
pub fn reconcile(devices: &mut [Device], reference: &Version) -> Vec<SkippedDevice> {
    let mut skipped = Vec::new();

    for device in devices.iter_mut() {
        match is_outdated(&device.firmware_version, reference) {
            Ok(outdated) => device.outdated = outdated,
            Err(error) => {
                warn!("Cannot compare {}: {error}", device.label());
                skipped.push(SkippedDevice {
                    address: device.address,
                    error,
                });
            }
        }
    }

    skipped
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
