use super::{CacheMetrics, CachedAnswer};
use dashmap::DashMap;
use relaydns_application::ports::{
    AnswerCache, CacheEntrySnapshot, CacheMetricsSnapshot, CachePutOutcome, CacheSkipReason,
};
use relaydns_domain::config::CacheConfig;
use relaydns_domain::{CacheKey, DnsMessage, ResponseCode};
use rustc_hash::FxBuildHasher;
use std::sync::atomic::Ordering as AtomicOrdering;
use tokio::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct DnsCacheConfig {
    pub enabled: bool,
    pub max_entries: usize,
    /// Upper bound applied to every stored TTL, in seconds.
    pub max_ttl: u32,
    /// Entries inspected when one must be evicted from a full cache.
    pub eviction_sample_size: usize,
}

impl From<&CacheConfig> for DnsCacheConfig {
    fn from(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            max_entries: config.max_entries,
            max_ttl: config.max_ttl,
            eviction_sample_size: config.eviction_sample_size,
        }
    }
}

impl Default for DnsCacheConfig {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

/// Answer cache on a sharded concurrent map.
///
/// Expired entries are dropped lazily by `lookup` and in bulk by
/// `purge_expired`. A full cache removes the entry closest to expiry among a
/// small sample.
pub struct DnsCache {
    cache: DashMap<CacheKey, CachedAnswer, FxBuildHasher>,
    enabled: bool,
    max_entries: usize,
    max_ttl: u32,
    eviction_sample_size: usize,
    metrics: CacheMetrics,
}

impl DnsCache {
    pub fn new(config: DnsCacheConfig) -> Self {
        info!(
            enabled = config.enabled,
            max_entries = config.max_entries,
            max_ttl = config.max_ttl,
            "Initializing DNS cache"
        );

        Self {
            cache: DashMap::with_capacity_and_hasher(
                config.max_entries.min(4096),
                FxBuildHasher,
            ),
            enabled: config.enabled,
            max_entries: config.max_entries.max(1),
            max_ttl: config.max_ttl,
            eviction_sample_size: config.eviction_sample_size.max(1),
            metrics: CacheMetrics::default(),
        }
    }

    pub fn cache_metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    fn skip(&self, reason: CacheSkipReason) -> CachePutOutcome {
        self.metrics.skipped.fetch_add(1, AtomicOrdering::Relaxed);
        CachePutOutcome::Skipped(reason)
    }

    fn admission(&self, message: &DnsMessage) -> Result<u32, CacheSkipReason> {
        if !self.enabled {
            return Err(CacheSkipReason::Disabled);
        }
        if message.header.truncated() {
            return Err(CacheSkipReason::Truncated);
        }
        let code = message.header.response_code();
        if code != ResponseCode::NoError {
            return Err(CacheSkipReason::ErrorResponse(code));
        }
        match message.min_answer_ttl() {
            None => Err(CacheSkipReason::NoAnswers),
            Some(0) => Err(CacheSkipReason::ZeroTtl),
            Some(ttl) => Ok(ttl.min(self.max_ttl)),
        }
    }

    /// Frees one slot by removing the entry closest to expiry among a sample.
    /// Bulk expiry is left to `purge_expired` so a put stays bounded.
    fn make_room(&self) -> usize {
        let now = Instant::now();
        let victim = self
            .cache
            .iter()
            .take(self.eviction_sample_size)
            .min_by_key(|entry| entry.value().expires_at)
            .map(|entry| (entry.key().clone(), entry.value().is_expired_at(now)));

        let Some((key, expired)) = victim else {
            return 0;
        };
        if self.cache.remove(&key).is_none() {
            return 0;
        }

        if expired {
            self.metrics.expirations.fetch_add(1, AtomicOrdering::Relaxed);
            debug!(key = %key, "Dropped expired cache entry to make room");
        } else {
            self.metrics.evictions.fetch_add(1, AtomicOrdering::Relaxed);
            debug!(key = %key, "Evicted cache entry to make room");
        }
        1
    }
}

impl AnswerCache for DnsCache {
    fn lookup(&self, key: &CacheKey) -> Option<DnsMessage> {
        if !self.enabled {
            return None;
        }
        let now = Instant::now();

        let found = match self.cache.get(key) {
            None => None,
            Some(entry) if entry.is_expired_at(now) => {
                drop(entry);
                if self
                    .cache
                    .remove_if(key, |_, answer| answer.is_expired_at(now))
                    .is_some()
                {
                    self.metrics.expirations.fetch_add(1, AtomicOrdering::Relaxed);
                }
                None
            }
            Some(entry) => Some(entry.aged_message_at(now)),
        };

        let counter = if found.is_some() {
            &self.metrics.hits
        } else {
            &self.metrics.misses
        };
        counter.fetch_add(1, AtomicOrdering::Relaxed);
        found
    }

    fn put(&self, key: CacheKey, message: &DnsMessage) -> CachePutOutcome {
        let ttl = match self.admission(message) {
            Ok(ttl) => ttl,
            Err(reason) => return self.skip(reason),
        };

        let mut stored = message.clone();
        for record in stored
            .answers
            .iter_mut()
            .chain(stored.authorities.iter_mut())
            .chain(stored.additionals.iter_mut())
            .filter(|r| !r.is_opt())
        {
            record.ttl = record.ttl.min(self.max_ttl);
        }

        let evicted = if !self.cache.contains_key(&key) && self.cache.len() >= self.max_entries {
            self.make_room()
        } else {
            0
        };

        self.cache.insert(key, CachedAnswer::new(stored, ttl));
        self.metrics.insertions.fetch_add(1, AtomicOrdering::Relaxed);

        CachePutOutcome::Stored { ttl, evicted }
    }

    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.cache.len();
        self.cache.retain(|_, answer| !answer.is_expired_at(now));
        let removed = before.saturating_sub(self.cache.len());

        if removed > 0 {
            self.metrics
                .expirations
                .fetch_add(removed as u64, AtomicOrdering::Relaxed);
        }
        removed
    }

    fn len(&self) -> usize {
        self.cache.len()
    }

    fn metrics(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.cache.len())
    }

    fn snapshot(&self) -> Vec<CacheEntrySnapshot> {
        let now = Instant::now();
        self.cache
            .iter()
            .filter(|entry| !entry.value().is_expired_at(now))
            .map(|entry| CacheEntrySnapshot {
                key: entry.key().clone(),
                remaining_ttl: entry.value().remaining_ttl_at(now),
                answers: entry.value().aged_message_at(now).answers,
            })
            .collect()
    }
}
