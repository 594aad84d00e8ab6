use relaydns_domain::{CacheKey, DnsMessage, ResourceRecord, ResponseCode};

/// Result of offering an upstream answer to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePutOutcome {
    Stored { ttl: u32, evicted: usize },
    Skipped(CacheSkipReason),
}

impl CachePutOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, CachePutOutcome::Stored { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSkipReason {
    Disabled,
    NoAnswers,
    ZeroTtl,
    Truncated,
    ErrorResponse(ResponseCode),
}

/// Snapshot of cache counters for API exposure.
#[derive(Debug, Clone, Default)]
pub struct CacheMetricsSnapshot {
    pub total_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub skipped: u64,
    pub hit_rate: f64,
}

/// One live cache entry as seen by the introspection endpoint.
#[derive(Debug, Clone)]
pub struct CacheEntrySnapshot {
    pub key: CacheKey,
    pub remaining_ttl: u32,
    pub answers: Vec<ResourceRecord>,
}

/// Answer cache keyed by normalized name and query type.
///
/// `lookup` never returns an entry whose lifetime has ended; the returned copy
/// already has its record TTLs lowered to the remaining lifetime.
pub trait AnswerCache: Send + Sync {
    fn lookup(&self, key: &CacheKey) -> Option<DnsMessage>;

    fn put(&self, key: CacheKey, message: &DnsMessage) -> CachePutOutcome;

    /// Removes every expired entry, returning how many were dropped.
    fn purge_expired(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn metrics(&self) -> CacheMetricsSnapshot;

    fn snapshot(&self) -> Vec<CacheEntrySnapshot>;
}
