//! Shared model for `fwscan`.
//!
//! Everything in here is plain data plus the parsing rules around it: the
//! address range to sweep, the [`device::Device`] record a probe produces, the
//! firmware and version grammar, and the error taxonomy the rest of the
//! workspace speaks. No network I/O happens in this crate.

pub mod config;
pub mod device;
pub mod error;
pub mod firmware;
pub mod network;
