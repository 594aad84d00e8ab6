pub mod get_snapshot;
pub mod purge_expired;

pub use get_snapshot::GetCacheSnapshotUseCase;
pub use purge_expired::{CachePurgeOutcome, PurgeExpiredCacheUseCase};
