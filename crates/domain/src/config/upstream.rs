use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Resolver every cache miss is forwarded to, as `ip:port`
    #[serde(default = "default_upstream_address")]
    pub address: String,
}

impl UpstreamConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.address.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid upstream address '{}': {}",
                self.address, e
            ))
        })
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: default_upstream_address(),
        }
    }
}

fn default_upstream_address() -> String {
    "114.114.114.114:53".to_string()
}
