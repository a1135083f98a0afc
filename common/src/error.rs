//! # Error Taxonomy
//!
//! Only [`InvalidRangeError`] and [`ReferenceVersionError`] end a run. The
//! others belong to a single address or a single device and are absorbed
//! where they happen.

use std::net::Ipv4Addr;

use thiserror::Error;

/// The target network could not be parsed as IPv4 CIDR notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRangeError {
    #[error("'{input}' is not in CIDR notation (expected <address>/<prefix>)")]
    MissingPrefix { input: String },

    #[error("invalid network address '{addr}' in '{input}'")]
    Address { input: String, addr: String },

    #[error("invalid prefix length '{prefix}' in '{input}' (must be 0-32)")]
    Prefix { input: String, prefix: String },
}

/// Failure of the HTTP capability itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {reason}")]
    Connect { url: String, reason: String },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("reading response from {url} failed: {reason}")]
    Body { url: String, reason: String },

    #[error("building HTTP client failed: {reason}")]
    Setup { reason: String },
}

/// Why a single address did not yield a [`crate::device::Device`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Nothing answered, or the answer was not a success.
    #[error("host unreachable: {0}")]
    Unreachable(#[from] TransportError),

    /// Something answered, but not with a status report we can use.
    #[error("incompatible device: {reason}")]
    Incompatible { reason: String },
}

impl ProbeError {
    pub fn incompatible(reason: impl Into<String>) -> Self {
        Self::Incompatible { reason: reason.into() }
    }
}

/// The latest released version could not be established.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReferenceVersionError {
    #[error("fetching release tags failed: {0}")]
    Fetch(#[from] TransportError),

    #[error("release feed returned malformed data: {0}")]
    Malformed(String),

    #[error("release feed lists no usable version tag")]
    NoReleases,
}

/// A firmware version string is not a plain `MAJOR.MINOR.PATCH` triple.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{version}' is not a comparable version: {reason}")]
pub struct VersionParseError {
    pub version: String,
    pub reason: String,
}

/// One step of the OTA sequence failed for one device.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateStepError {
    #[error("setting OTA url on {address} failed: {source}")]
    SetOtaUrl {
        address: Ipv4Addr,
        source: TransportError,
    },

    #[error("triggering upgrade on {address} failed: {source}")]
    Trigger {
        address: Ipv4Addr,
        source: TransportError,
    },
}

/// Errors that abort a whole scan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error(transparent)]
    Range(#[from] InvalidRangeError),

    #[error(transparent)]
    Reference(#[from] ReferenceVersionError),
}
