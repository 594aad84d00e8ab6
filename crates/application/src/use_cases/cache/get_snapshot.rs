use crate::ports::{AnswerCache, CacheEntrySnapshot, CacheMetricsSnapshot};
use std::sync::Arc;

/// Read-only view of the answer cache for the introspection endpoint.
pub struct GetCacheSnapshotUseCase {
    cache: Arc<dyn AnswerCache>,
}

impl GetCacheSnapshotUseCase {
    pub fn new(cache: Arc<dyn AnswerCache>) -> Self {
        Self { cache }
    }

    /// Live entries, soonest-to-expire last.
    pub fn entries(&self) -> Vec<CacheEntrySnapshot> {
        let mut entries = self.cache.snapshot();
        entries.sort_by(|a, b| {
            b.remaining_ttl
                .cmp(&a.remaining_ttl)
                .then_with(|| a.key.domain.cmp(&b.key.domain))
        });
        entries
    }

    pub fn metrics(&self) -> CacheMetricsSnapshot {
        self.cache.metrics()
    }
}
