//! Shared fixtures for the end-to-end tests: an in-memory network of fake
//! devices reachable through [`HttpTransport`].

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use fwscan_common::error::TransportError;
use fwscan_core::network::{command, transport::HttpTransport};

/// Body a device answers `Status 0` with.
pub fn status_body(name: &str, firmware: &str) -> String {
    format!(r#"{{"Status":{{"DeviceName":"{name}","Topic":"x"}},"StatusFWR":{{"Version":"{firmware}","BuildDateTime":"2024-01-01T00:00:00"}}}}"#)
}

enum Reply {
    Body(Duration, String),
    Hang,
}

/// Fake LAN. Addresses that were never registered fail like a host that is not
/// there; hanging addresses never answer.
#[derive(Default)]
pub struct FakeNetwork {
    password: Option<String>,
    routes: HashMap<String, Reply>,
    requests: Mutex<Vec<String>>,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devices registered afterwards expect this password in every request.
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    pub fn device(self, address: Ipv4Addr, name: &str, firmware: &str) -> Self {
        self.device_after(address, Duration::ZERO, name, firmware)
    }

    pub fn device_after(mut self, address: Ipv4Addr, delay: Duration, name: &str, firmware: &str) -> Self {
        let url = command::status_url(address, self.password.as_deref());
        self.routes.insert(url, Reply::Body(delay, status_body(name, firmware)));
        self
    }

    /// Any other web server that answers with something that is not device status.
    pub fn foreign(mut self, address: Ipv4Addr, body: &str) -> Self {
        let url = command::status_url(address, self.password.as_deref());
        self.routes.insert(url, Reply::Body(Duration::ZERO, body.to_string()));
        self
    }

    pub fn hanging(mut self, address: Ipv4Addr) -> Self {
        let url = command::status_url(address, self.password.as_deref());
        self.routes.insert(url, Reply::Hang);
        self
    }

    /// Lets `address` accept any command besides `Status 0`.
    pub fn accept(mut self, url: &str) -> Self {
        self.routes.insert(url.to_string(), Reply::Body(Duration::ZERO, "{}".to_string()));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl HttpTransport for FakeNetwork {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        match self.routes.get(url) {
            Some(Reply::Body(delay, body)) => {
                tokio::time::sleep(*delay).await;
                Ok(body.clone())
            }
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(TransportError::Connect {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}
