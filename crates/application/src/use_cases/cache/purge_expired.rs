use crate::ports::AnswerCache;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default, Clone)]
pub struct CachePurgeOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

pub struct PurgeExpiredCacheUseCase {
    cache: Arc<dyn AnswerCache>,
}

impl PurgeExpiredCacheUseCase {
    pub fn new(cache: Arc<dyn AnswerCache>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) -> CachePurgeOutcome {
        let entries_removed = self.cache.purge_expired();
        let cache_size = self.cache.len();

        if entries_removed > 0 {
            debug!(
                removed = entries_removed,
                cache_size = cache_size,
                "Purged expired cache entries"
            );
        }

        CachePurgeOutcome {
            entries_removed,
            cache_size,
        }
    }
}
