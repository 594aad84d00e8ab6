use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Longest lifetime granted to an entry, whatever the upstream TTL says
    #[serde(default = "default_max_ttl")]
    pub max_ttl: u32,

    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,

    /// Entries inspected when choosing an eviction victim on a full cache
    #[serde(default = "default_eviction_sample_size")]
    pub eviction_sample_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_max_entries(),
            max_ttl: default_max_ttl(),
            purge_interval_secs: default_purge_interval_secs(),
            eviction_sample_size: default_eviction_sample_size(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_entries() -> usize {
    10_000
}

fn default_max_ttl() -> u32 {
    86_400
}

fn default_purge_interval_secs() -> u64 {
    60
}

fn default_eviction_sample_size() -> usize {
    8
}
