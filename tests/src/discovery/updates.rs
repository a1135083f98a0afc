#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use fwscan_common::config::ScanConfig;
use fwscan_common::error::UpdateStepError;
use fwscan_core::discovery::DiscoveryService;
use fwscan_core::network::command;
use fwscan_core::release::FixedRelease;
use fwscan_integration_tests::FakeNetwork;
use semver::Version;

const OTA_URL: &str = "http://ota.example/release/";

fn config() -> ScanConfig {
    ScanConfig {
        cidr: "10.0.0.0/30".to_string(),
        ota_url: OTA_URL.to_string(),
        do_updates: true,
        probe_timeout: Duration::from_millis(200),
        ..ScanConfig::default()
    }
}

fn addr(last: u8) -> Ipv4Addr {
    Ipv4Addr::new(10, 0, 0, last)
}

fn set_url(host: Ipv4Addr, image: &str) -> String {
    command::command_url(host, None, &command::ota_url_command(&format!("{OTA_URL}{image}")))
}

fn trigger_url(host: Ipv4Addr) -> String {
    command::command_url(host, None, command::UPGRADE_COMMAND)
}

/// Only outdated devices are updated, each with the image of its own variant,
/// and the upgrade is triggered right after the OTA URL is set.
#[tokio::test]
async fn updates_outdated_devices_with_matching_images() {
    let network = Arc::new(
        FakeNetwork::new()
            .device(addr(1), "A", "1.0.0(tasmota)")
            .device(addr(2), "B", "2.0.0(sensors)")
            .device(addr(3), "C", "1.2.0(lite)")
            .accept(&set_url(addr(1), "tasmota.bin"))
            .accept(&trigger_url(addr(1)))
            .accept(&set_url(addr(3), "tasmota-lite.bin"))
            .accept(&trigger_url(addr(3))),
    );
    let service = DiscoveryService::new(network.clone(), Box::new(FixedRelease(Version::new(1, 5, 0))));
    let cfg = config();

    let report = service.perform_discovery(&cfg, None).await.unwrap();
    let outcomes = service.update_outdated(&cfg, &report).await;

    let images: Vec<&str> = outcomes.iter().map(|o| o.firmware_url.as_str()).collect();
    assert_eq!(
        images,
        vec![
            "http://ota.example/release/tasmota.bin",
            "http://ota.example/release/tasmota-lite.bin",
        ]
    );
    assert!(outcomes.iter().all(|o| o.succeeded()));

    let commands: Vec<String> = network
        .requested()
        .into_iter()
        .filter(|url| !url.ends_with(command::STATUS_COMMAND))
        .collect();
    assert_eq!(
        commands,
        vec![
            set_url(addr(1), "tasmota.bin"),
            trigger_url(addr(1)),
            set_url(addr(3), "tasmota-lite.bin"),
            trigger_url(addr(3)),
        ]
    );
}

#[tokio::test]
async fn failing_device_does_not_stop_the_batch() {
    let network = Arc::new(
        FakeNetwork::new()
            .device(addr(1), "no-url", "1.0.0(tasmota)")
            .device(addr(2), "ok", "1.0.0(tasmota)")
            .accept(&trigger_url(addr(1)))
            .accept(&set_url(addr(2), "tasmota.bin"))
            .accept(&trigger_url(addr(2))),
    );
    let service = DiscoveryService::new(network.clone(), Box::new(FixedRelease(Version::new(2, 0, 0))));
    let cfg = config();

    let report = service.perform_discovery(&cfg, None).await.unwrap();
    let outcomes = service.update_outdated(&cfg, &report).await;

    assert_eq!(outcomes.len(), 2);
    assert!(matches!(
        outcomes[0].errors.as_slice(),
        [UpdateStepError::SetOtaUrl { address, .. }] if *address == addr(1)
    ));
    assert!(outcomes[1].succeeded());
    assert!(
        network.requested().contains(&trigger_url(addr(1))),
        "the upgrade is triggered even when setting the OTA URL failed"
    );
}

#[tokio::test]
async fn nothing_is_sent_when_everything_is_current() {
    let network = Arc::new(FakeNetwork::new().device(addr(1), "A", "14.0.0(tasmota)"));
    let service = DiscoveryService::new(network.clone(), Box::new(FixedRelease(Version::new(14, 0, 0))));
    let cfg = config();

    let report = service.perform_discovery(&cfg, None).await.unwrap();
    let outcomes = service.update_outdated(&cfg, &report).await;

    assert!(outcomes.is_empty());
    assert!(network.requested().iter().all(|url| url.ends_with(command::STATUS_COMMAND)));
}
