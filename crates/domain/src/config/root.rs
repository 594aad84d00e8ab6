use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_PATH: &str = "relaydns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/relaydns/config.toml";

/// Main configuration structure for relaydns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening sockets (DNS port, bind address, introspection port)
    #[serde(default)]
    pub server: ServerConfig,

    /// The single resolver cache misses are forwarded to
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// In-flight query handling
    #[serde(default)]
    pub dns: DnsConfig,

    /// Answer cache sizing and expiry
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. relaydns.toml in current directory
    /// 3. /etc/relaydns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Parse configuration from TOML text; absent sections take their defaults
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(upstream) = overrides.upstream {
            self.upstream.address = upstream;
        }
        if overrides.disable_web {
            self.server.web_enabled = false;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.web_enabled && self.server.web_port == self.server.dns_port {
            return Err(ConfigError::Validation(format!(
                "Web port {} collides with the DNS port",
                self.server.web_port
            )));
        }

        self.server.dns_socket_addr()?;
        self.upstream.socket_addr()?;

        if self.dns.query_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "query_timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.dns.pending_sweep_interval_secs == 0 || self.cache.purge_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Sweep intervals must be at least 1 second".to_string(),
            ));
        }

        if self.dns.max_pending == 0 {
            return Err(ConfigError::Validation(
                "max_pending must be at least 1".to_string(),
            ));
        }

        if self.cache.enabled && self.cache.max_entries == 0 {
            return Err(ConfigError::Validation(
                "cache.max_entries must be at least 1 when the cache is enabled".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream: Option<String>,
    pub disable_web: bool,
    pub log_level: Option<String>,
}
