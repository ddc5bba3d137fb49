//! Latest-version lookup for the framework package
//!
//! The lookup never fails: any network, status, or parse problem degrades to the
//! configured fallback and is logged as a warning.

use crate::product::{Framework, ProductConfig};
use semver::Version;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Timeout for a single registry request
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Capability for resolving the version of a package to depend on
#[allow(async_fn_in_trait)]
pub trait VersionLookup {
    /// Return the version to use for `package`, never an error
    async fn latest_version(&self, package: &str) -> String;
}

/// Always answers with the same version (offline mode, tests)
#[derive(Debug, Clone)]
pub struct PinnedVersion(pub String);

impl VersionLookup for PinnedVersion {
    async fn latest_version(&self, _package: &str) -> String {
        self.0.clone()
    }
}

#[derive(Debug, Deserialize)]
struct LatestManifest {
    version: String,
}

/// Queries an npm-compatible registry for `<package>/latest`
pub struct RegistryLookup {
    registry: Url,
    client: reqwest::Client,
    fallback: String,
}

impl RegistryLookup {
    /// Create a lookup against `registry` that degrades to `fallback`
    pub fn new(registry: Url, user_agent: &str, fallback: impl Into<String>) -> Self {
        Self {
            registry,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(LOOKUP_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            fallback: fallback.into(),
        }
    }

    /// Build `<registry>/<package>/latest`, escaping the scope separator
    fn latest_url(&self, package: &str) -> Option<Url> {
        let mut url = self.registry.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(package)
            .push("latest");
        Some(url)
    }

    async fn fetch(&self, package: &str) -> Result<String, String> {
        let url = self
            .latest_url(package)
            .ok_or_else(|| format!("registry URL cannot have path segments: {}", self.registry))?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| format!("request to {} failed: {}", url, e))?;

        if !response.status().is_success() {
            return Err(format!("{} answered HTTP {}", url, response.status()));
        }

        let manifest: LatestManifest = response
            .json()
            .await
            .map_err(|e| format!("unreadable reply from {}: {}", url, e))?;

        parse_version(&manifest.version).map(|v| v.to_string())
    }
}

impl VersionLookup for RegistryLookup {
    async fn latest_version(&self, package: &str) -> String {
        match self.fetch(package).await {
            Ok(version) => {
                log::debug!("resolved {} to {}", package, version);
                version
            }
            Err(reason) => {
                log::warn!(
                    "could not resolve latest {} ({}), using {}",
                    package,
                    reason,
                    self.fallback
                );
                self.fallback.clone()
            }
        }
    }
}

/// Resolve the framework version through `lookup` and bind it to the product identity
pub async fn resolve_framework<C: ProductConfig, L: VersionLookup>(config: &C, lookup: &L) -> Framework {
    let version = lookup.latest_version(config.framework_package()).await;
    Framework::from_config(config, version)
}

/// Parse version string, handling a leading `v`
pub fn parse_version(version_str: &str) -> Result<Version, String> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).map_err(|e| format!("invalid version '{}': {}", version_str, e))
}
