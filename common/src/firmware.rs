//! # Firmware Grammar
//!
//! Devices report their build as `"<version>(<variant>)"`, for example
//! `"9.1.0(tasmota)"` or `"12.4.0(sensors)"`. This module splits that string
//! and turns version strings into comparable [`semver::Version`]s.

use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

use crate::error::{ProbeError, VersionParseError};

/// Build variant of the default firmware image.
pub const DEFAULT_VARIANT: &str = "tasmota";

static FIRMWARE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^()\s]+)\(([^()\s]+)\)$").expect("firmware pattern is a valid regex")
});

/// Version and build variant as reported by a device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Firmware {
    pub version: String,
    pub variant: String,
}

/// The default image carries no variant suffix in its file name.
pub fn is_default_variant(variant: &str) -> bool {
    variant == DEFAULT_VARIANT
}

/// Splits a `"<version>(<variant>)"` self-report.
///
/// Anything else means the responder is not an update target.
pub fn parse_firmware(raw: &str) -> Result<Firmware, ProbeError> {
    let captures = FIRMWARE_PATTERN
        .captures(raw.trim())
        .ok_or_else(|| ProbeError::incompatible(format!("unexpected firmware string '{raw}'")))?;

    Ok(Firmware {
        version: captures[1].to_string(),
        variant: captures[2].to_string(),
    })
}

/// Parses a strict `MAJOR.MINOR.PATCH` release version.
///
/// Pre-release and build suffixes are refused along with everything semver
/// itself refuses (missing components, leading zeros).
pub fn parse_version(raw: &str) -> Result<Version, VersionParseError> {
    let version = Version::parse(raw).map_err(|e| VersionParseError {
        version: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !version.pre.is_empty() || !version.build.is_empty() {
        return Err(VersionParseError {
            version: raw.to_string(),
            reason: "pre-release and build suffixes are not comparable".to_string(),
        });
    }

    Ok(version)
}

/// Drops everything before the first digit of a release tag (`v13.1.0` -> `13.1.0`).
pub fn strip_tag_prefix(tag: &str) -> &str {
    tag.trim_start_matches(|c: char| !c.is_ascii_digit())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
