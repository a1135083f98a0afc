//! The HTTP capability every stage talks through: GET a URL, get the body or
//! an error, never wait longer than the configured timeout.

use std::time::Duration;

use async_trait::async_trait;
use fwscan_common::error::TransportError;

const USER_AGENT: &str = concat!("fwscan/", env!("CARGO_PKG_VERSION"));

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs a GET and returns the body of a 2xx response.
    async fn get(&self, url: &str) -> Result<String, TransportError>;
}

/// [`HttpTransport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Client that honours the proxy settings of the environment.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        Self::build(reqwest::Client::builder(), timeout)
    }

    /// Client that ignores proxies. Devices live on the local segment.
    pub fn direct(timeout: Duration) -> Result<Self, TransportError> {
        Self::build(reqwest::Client::builder().no_proxy(), timeout)
    }

    fn build(builder: reqwest::ClientBuilder, timeout: Duration) -> Result<Self, TransportError> {
        let client = builder
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Setup { reason: e.to_string() })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout { url: url.to_string() }
            } else {
                TransportError::Body {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }
}

fn request_error(url: &str, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout { url: url.to_string() }
    } else {
        TransportError::Connect {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}


// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
