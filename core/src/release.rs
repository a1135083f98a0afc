//! Where the latest firmware release comes from.
//!
//! The feed is handed to the discovery service explicitly, so a run can use
//! GitHub, a pinned version, or anything a test provides.

use std::sync::Arc;

use async_trait::async_trait;
use fwscan_common::{error::ReferenceVersionError, firmware};
use semver::Version;
use serde::Deserialize;
use tracing::{debug, info};

use crate::network::transport::HttpTransport;

pub const UPSTREAM_OWNER: &str = "arendst";
pub const UPSTREAM_REPOSITORY: &str = "tasmota";

const GITHUB_API: &str = "https://api.github.com";

#[async_trait]
pub trait ReleaseFeed: Send + Sync {
    async fn latest_version(&self) -> Result<Version, ReferenceVersionError>;
}

/// Latest release taken from the tag list of a GitHub repository.
pub struct GithubTags {
    transport: Arc<dyn HttpTransport>,
    owner: String,
    repository: String,
}

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

impl GithubTags {
    pub fn new(transport: Arc<dyn HttpTransport>, owner: &str, repository: &str) -> Self {
        Self {
            transport,
            owner: owner.to_string(),
            repository: repository.to_string(),
        }
    }

    /// The Tasmota project itself.
    pub fn upstream(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(transport, UPSTREAM_OWNER, UPSTREAM_REPOSITORY)
    }

    pub fn tags_url(&self) -> String {
        format!("{GITHUB_API}/repos/{}/{}/tags?per_page=100", self.owner, self.repository)
    }
}

#[async_trait]
impl ReleaseFeed for GithubTags {
    async fn latest_version(&self) -> Result<Version, ReferenceVersionError> {
        let url = self.tags_url();
        debug!("Fetching release tags from {url}");

        let body = self.transport.get(&url).await?;
        let version = newest_tag(&body)?;

        info!("Latest {}/{} release is {version}", self.owner, self.repository);
        Ok(version)
    }
}

/// A release version pinned by the operator.
pub struct FixedRelease(pub Version);

#[async_trait]
impl ReleaseFeed for FixedRelease {
    async fn latest_version(&self) -> Result<Version, ReferenceVersionError> {
        info!("Using pinned release {}", self.0);
        Ok(self.0.clone())
    }
}

/// Picks the highest release version out of a GitHub tag list.
///
/// Tags that are not plain `MAJOR.MINOR.PATCH` after their prefix is stripped
/// (pre-releases, nightlies, odd names) are ignored.
pub fn newest_tag(body: &str) -> Result<Version, ReferenceVersionError> {
    let tags: Vec<Tag> =
        serde_json::from_str(body).map_err(|e| ReferenceVersionError::Malformed(e.to_string()))?;

    tags.iter()
        .filter_map(|tag| firmware::parse_version(firmware::strip_tag_prefix(&tag.name)).ok())
        .max()
        .ok_or(ReferenceVersionError::NoReleases)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
