pub mod cache;
pub mod dns;

pub use cache::{CachePurgeOutcome, GetCacheSnapshotUseCase, PurgeExpiredCacheUseCase};
pub use dns::{
    GetPendingStatsUseCase, PendingStats, QueryRouter, RouteOutcome, SweepOutcome,
    SweepPendingQueriesUseCase,
};
