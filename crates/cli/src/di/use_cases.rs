use super::DnsServices;
use relaydns_api::AppState;
use relaydns_application::use_cases::{
    GetCacheSnapshotUseCase, GetPendingStatsUseCase, PurgeExpiredCacheUseCase,
    SweepPendingQueriesUseCase,
};
use relaydns_domain::Config;
use std::sync::Arc;
use std::time::Duration;

pub struct UseCases {
    pub sweep_pending: Arc<SweepPendingQueriesUseCase>,
    pub purge_cache: Arc<PurgeExpiredCacheUseCase>,
    pub cache_snapshot: Arc<GetCacheSnapshotUseCase>,
    pub pending_stats: Arc<GetPendingStatsUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, dns: &DnsServices) -> Self {
        let sweep_pending = SweepPendingQueriesUseCase::new(
            dns.pending.clone(),
            dns.codec.clone(),
            dns.transport.clone(),
            Duration::from_secs(config.dns.query_timeout_secs),
        )
        .with_servfail_on_timeout(config.dns.servfail_on_timeout);

        Self {
            sweep_pending: Arc::new(sweep_pending),
            purge_cache: Arc::new(PurgeExpiredCacheUseCase::new(dns.cache.clone())),
            cache_snapshot: Arc::new(GetCacheSnapshotUseCase::new(dns.cache.clone())),
            pending_stats: Arc::new(GetPendingStatsUseCase::new(dns.pending.clone())),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            cache: self.cache_snapshot.clone(),
            pending: self.pending_stats.clone(),
        }
    }
}
