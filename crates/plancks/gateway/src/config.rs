//! Gateway configuration

use crate::error::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};

/// Connection settings for the cluster control plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Engine endpoint (`http://`, `https://` or `tcp://`)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API version path prefix; empty to use the engine's default
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_version: default_api_version(),
            timeout_secs: default_timeout(),
        }
    }
}

impl GatewayConfig {
    /// Defaults overridden by `DOCKER_HOST` and `DOCKER_API_VERSION`, when set.
    pub fn from_docker_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("DOCKER_HOST") {
            if !host.is_empty() {
                config.endpoint = host;
            }
        }
        if let Ok(version) = std::env::var("DOCKER_API_VERSION") {
            if !version.is_empty() {
                config.api_version = version;
            }
        }
        config
    }

    /// Base URL for requests, with the API version prefix applied
    pub fn base_url(&self) -> GatewayResult<String> {
        let endpoint = self.endpoint.trim_end_matches('/');

        let endpoint = if let Some(rest) = endpoint.strip_prefix("tcp://") {
            format!("http://{}", rest)
        } else if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if endpoint.starts_with("unix://") || endpoint.starts_with("npipe://") {
            return Err(GatewayError::Config(format!(
                "Socket endpoints are not supported, expose the engine over TCP: {}",
                endpoint
            )));
        } else {
            return Err(GatewayError::Config(format!(
                "Invalid endpoint: {}",
                endpoint
            )));
        };

        let version = self.api_version.trim_matches('/');
        if version.is_empty() {
            return Ok(endpoint);
        }

        let version = if version.starts_with('v') {
            version.to_string()
        } else {
            format!("v{}", version)
        };
        Ok(format!("{}/{}", endpoint, version))
    }
}

fn default_endpoint() -> String {
    "http://localhost:2375".to_string()
}

fn default_api_version() -> String {
    "v1.41".to_string()
}

fn default_timeout() -> u64 {
    30
}
