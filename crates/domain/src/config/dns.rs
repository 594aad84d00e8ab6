use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Seconds a forwarded query may wait for the upstream before it is abandoned
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,

    #[serde(default = "default_pending_sweep_interval_secs")]
    pub pending_sweep_interval_secs: u64,

    /// Upper bound on queries waiting for the upstream at once
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,

    /// Answer abandoned queries with SERVFAIL instead of staying silent
    #[serde(default)]
    pub servfail_on_timeout: bool,

    /// Random upstream IDs tried when the client's own ID is already in flight
    #[serde(default = "default_id_allocation_attempts")]
    pub id_allocation_attempts: usize,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            query_timeout_secs: default_query_timeout_secs(),
            pending_sweep_interval_secs: default_pending_sweep_interval_secs(),
            max_pending: default_max_pending(),
            servfail_on_timeout: false,
            id_allocation_attempts: default_id_allocation_attempts(),
        }
    }
}

fn default_query_timeout_secs() -> u64 {
    5
}

fn default_pending_sweep_interval_secs() -> u64 {
    1
}

fn default_max_pending() -> usize {
    4096
}

fn default_id_allocation_attempts() -> usize {
    16
}
