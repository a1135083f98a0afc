//! Discovery, reconciliation and update engine of `fwscan`.
//!
//! * [`scanner`] sweeps an address range with many concurrent status probes.
//! * [`release`] establishes the latest firmware release.
//! * [`reconciler`] flags devices that run something older.
//! * [`updater`] pushes the OTA sequence to flagged devices.
//! * [`discovery`] strings the above together for one run.
//!
//! All network access goes through [`network::transport::HttpTransport`], so
//! every stage can run against in-memory responders.

pub mod discovery;
pub mod network;
pub mod reconciler;
pub mod release;
pub mod scanner;
pub mod updater;
