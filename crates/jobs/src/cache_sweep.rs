use relaydns_application::use_cases::PurgeExpiredCacheUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::info;

const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Removes expired answers that no lookup has touched since they expired.
pub struct CacheSweepJob {
    purge: Arc<PurgeExpiredCacheUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheSweepJob {
    pub fn new(purge: Arc<PurgeExpiredCacheUseCase>) -> Self {
        Self {
            purge,
            interval_secs: DEFAULT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting cache sweep job");

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("CacheSweepJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    let outcome = self.purge.execute();
                    if outcome.entries_removed > 0 {
                        info!(
                            entries_removed = outcome.entries_removed,
                            cache_size = outcome.cache_size,
                            "Cache sweep completed"
                        );
                    }
                }
            }
        }
    }
}
