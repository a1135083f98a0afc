//! # IPv4 Range Model
//!
//! Expands a CIDR block such as `192.168.0.0/24` into the closed interval
//! `[network, broadcast]` that the scanner sweeps.

use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::InvalidRangeError;

/// A continuous, inclusive range of IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Walks the range in ascending numeric order.
    ///
    /// The iterator borrows nothing, so calling this again restarts the walk.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone + Send + 'static {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    /// Number of addresses in the range. `u64` because `0.0.0.0/0` holds 2^32.
    pub fn len(&self) -> u64 {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        if end < start {
            return 0;
        }
        u64::from(end - start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end_addr < self.start_addr
    }
}

impl FromStr for Ipv4Range {
    type Err = InvalidRangeError;

    /// Parses CIDR notation like "192.168.1.0/24".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((ip_str, prefix_str)) = s.split_once('/') else {
            return Err(InvalidRangeError::MissingPrefix { input: s.to_string() });
        };

        let ipv4_addr = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|_| InvalidRangeError::Address {
                input: s.to_string(),
                addr: ip_str.to_string(),
            })?;

        let prefix = parse_prefix(prefix_str).ok_or_else(|| InvalidRangeError::Prefix {
            input: s.to_string(),
            prefix: prefix_str.to_string(),
        })?;

        cidr_range(ipv4_addr, prefix).map_err(|_| InvalidRangeError::Prefix {
            input: s.to_string(),
            prefix: prefix_str.to_string(),
        })
    }
}

/// Plain decimal prefix length: digits only, no sign, no zero padding.
fn parse_prefix(raw: &str) -> Option<u8> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if raw.len() > 1 && raw.starts_with('0') {
        return None;
    }
    raw.parse().ok()
}

/// Creates the range covering the whole network block of `ip/prefix`.
///
/// Host bits in `ip` are masked off, so `10.0.0.7/30` yields `10.0.0.4-10.0.0.7`.
pub fn cidr_range(ip: Ipv4Addr, prefix: u8) -> Result<Ipv4Range, pnet::ipnetwork::IpNetworkError> {
    let network = Ipv4Network::new(ip, prefix)?;
    let start = network.network();
    let end = network.broadcast();

    Ok(Ipv4Range::new(start, end))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_class_c_network() {
        let range: Ipv4Range = "192.168.0.0/24".parse().unwrap();
        assert_eq!(range.start_addr, Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(range.end_addr, Ipv4Addr::new(192, 168, 0, 255));
        assert_eq!(range.len(), 256);
    }

    #[test]
    fn masks_host_bits() {
        let range: Ipv4Range = "10.0.0.7/30".parse().unwrap();
        assert_eq!(range.start_addr, Ipv4Addr::new(10, 0, 0, 4));
        assert_eq!(range.end_addr, Ipv4Addr::new(10, 0, 0, 7));
    }

    #[test]
    fn length_matches_prefix_for_every_prefix() {
        let base = Ipv4Addr::new(172, 16, 93, 201);
        for prefix in 0..=32u8 {
            let range = cidr_range(base, prefix).unwrap();
            assert_eq!(range.len(), 1u64 << (32 - prefix), "prefix /{prefix}");

            let mask: u32 = if prefix == 0 { 0 } else { u32::MAX << (32 - prefix) };
            let start: u32 = range.start_addr.into();
            let end: u32 = range.end_addr.into();
            assert_eq!(start, u32::from(base) & mask);
            assert_eq!(end, start | !mask);
        }
    }

    #[test]
    fn iterates_in_ascending_order_and_restarts() {
        let range: Ipv4Range = "10.0.0.0/30".parse().unwrap();
        let first: Vec<Ipv4Addr> = range.iter().collect();
        assert_eq!(
            first,
            vec![
                Ipv4Addr::new(10, 0, 0, 0),
                Ipv4Addr::new(10, 0, 0, 1),
                Ipv4Addr::new(10, 0, 0, 2),
                Ipv4Addr::new(10, 0, 0, 3),
            ]
        );
        assert_eq!(range.iter().collect::<Vec<_>>(), first);
    }

    #[test]
    fn single_host_block() {
        let range: Ipv4Range = "192.168.1.77/32".parse().unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range.iter().next(), Some(Ipv4Addr::new(192, 168, 1, 77)));
        assert_eq!(range.iter().last(), Some(Ipv4Addr::new(192, 168, 1, 77)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            "192.168.0.0".parse::<Ipv4Range>(),
            Err(InvalidRangeError::MissingPrefix { .. })
        ));
        assert!(matches!(
            "192.168.0.300/24".parse::<Ipv4Range>(),
            Err(InvalidRangeError::Address { .. })
        ));
        assert!(matches!(
            "10.0.0.0/33".parse::<Ipv4Range>(),
            Err(InvalidRangeError::Prefix { .. })
        ));
        assert!(matches!(
            "10.0.0.0/abc".parse::<Ipv4Range>(),
            Err(InvalidRangeError::Prefix { .. })
        ));
        assert!("::1/128".parse::<Ipv4Range>().is_err());
        assert!("".parse::<Ipv4Range>().is_err());
    }

    #[test]
    fn prefix_must_be_plain_decimal() {
        for input in ["10.0.0.0/+24", "10.0.0.0/", "10.0.0.0/024", "10.0.0.0/ 24", "10.0.0.0/-0"] {
            assert!(
                matches!(input.parse::<Ipv4Range>(), Err(InvalidRangeError::Prefix { .. })),
                "{input} should be rejected"
            );
        }
        assert_eq!("10.0.0.0/0".parse::<Ipv4Range>().unwrap().len(), 1u64 << 32);
    }
}
