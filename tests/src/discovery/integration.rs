#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use fwscan_common::config::ScanConfig;
use fwscan_common::device::Device;
use fwscan_common::error::ScanError;
use fwscan_core::discovery::{DiscoveryService, ScanReport};
use fwscan_core::release::FixedRelease;
use fwscan_integration_tests::FakeNetwork;
use semver::Version;

fn config(cidr: &str) -> ScanConfig {
    ScanConfig {
        cidr: cidr.to_string(),
        probe_timeout: Duration::from_millis(200),
        ..ScanConfig::default()
    }
}

fn service(network: Arc<FakeNetwork>, reference: Version) -> DiscoveryService {
    DiscoveryService::new(network, Box::new(FixedRelease(reference)))
}

fn addr(last: u8) -> Ipv4Addr {
    Ipv4Addr::new(10, 0, 0, last)
}

fn two_devices() -> FakeNetwork {
    FakeNetwork::new()
        .device_after(addr(1), Duration::from_millis(40), "A", "1.0.0(tasmota)")
        .device(addr(2), "B", "2.0.0(sensors)")
}

/// Scans a /30 holding one outdated and one current device against a fixed
/// reference and checks the classified, address-ordered result.
#[tokio::test]
async fn finds_and_classifies_devices() {
    let network = Arc::new(two_devices());
    let report: ScanReport = service(network.clone(), Version::new(1, 5, 0))
        .perform_discovery(&config("10.0.0.0/30"), None)
        .await
        .expect("scan failed");

    let expected = vec![
        Device {
            address: addr(1),
            name: "A".to_string(),
            firmware_version: "1.0.0".to_string(),
            firmware_variant: "tasmota".to_string(),
            outdated: true,
        },
        Device {
            address: addr(2),
            name: "B".to_string(),
            firmware_version: "2.0.0".to_string(),
            firmware_variant: "sensors".to_string(),
            outdated: false,
        },
    ];
    assert_eq!(report.devices, expected);
    assert_eq!(report.stats.probed, 4);
    assert_eq!(report.stats.found, 2);
    assert_eq!(report.outdated().count(), 1);
    assert_eq!(network.requested().len(), 4, "every address is probed exactly once");
}

#[tokio::test]
async fn repeated_scans_give_the_same_list() {
    let network = Arc::new(two_devices());
    let service = service(network, Version::new(1, 5, 0));
    let cfg = config("10.0.0.0/30");

    let first = service.perform_discovery(&cfg, None).await.unwrap();
    let second = service.perform_discovery(&cfg, None).await.unwrap();

    assert_eq!(first.devices, second.devices);
}

#[tokio::test]
async fn silent_and_foreign_hosts_do_not_stop_the_scan() {
    let network = Arc::new(
        FakeNetwork::new()
            .hanging(addr(0))
            .device(addr(1), "plug", "12.0.2(tasmota)")
            .foreign(addr(2), "<html>router login</html>")
            .device(addr(3), "lamp", "not-a-version(tasmota)"),
    );

    let report = service(network, Version::new(13, 0, 0))
        .perform_discovery(&config("10.0.0.0/30"), None)
        .await
        .unwrap();

    let addresses: Vec<Ipv4Addr> = report.devices.iter().map(|d| d.address).collect();
    assert_eq!(addresses, vec![addr(1), addr(3)]);
    assert!(report.devices[0].outdated);
    assert!(!report.devices[1].outdated, "unparseable versions are never flagged");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].address, addr(3));
    assert_eq!(report.stats.unreachable, 1);
    assert_eq!(report.stats.incompatible, 1);
}

#[tokio::test]
async fn password_is_sent_with_every_probe() {
    let network = Arc::new(
        FakeNetwork::new()
            .with_password("hunter2")
            .device(addr(5), "secure", "13.0.0(tasmota)"),
    );
    let mut cfg = config("10.0.0.5/32");
    cfg.password = Some("hunter2".to_string());

    let report = service(network.clone(), Version::new(13, 0, 0))
        .perform_discovery(&cfg, None)
        .await
        .unwrap();

    assert_eq!(report.devices.len(), 1);
    assert!(!report.devices[0].outdated);
    assert_eq!(
        network.requested(),
        vec!["http://10.0.0.5/cm?user=admin&password=hunter2&cmnd=Status%200".to_string()]
    );
}

#[tokio::test]
async fn invalid_range_is_reported_before_any_probe() {
    let network = Arc::new(two_devices());
    let result = service(network.clone(), Version::new(1, 0, 0))
        .perform_discovery(&config("10.0.0.0"), None)
        .await;

    assert!(matches!(result, Err(ScanError::Range(_))));
    assert!(network.requested().is_empty());
}

#[tokio::test]
async fn empty_network_yields_empty_report() {
    let network = Arc::new(FakeNetwork::new());
    let report = service(network, Version::new(1, 0, 0))
        .perform_discovery(&config("192.168.7.0/29"), None)
        .await
        .unwrap();

    assert!(report.devices.is_empty());
    assert_eq!(report.stats.probed, 8);
}
