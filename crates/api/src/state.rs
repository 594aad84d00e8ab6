use relaydns_application::use_cases::{GetCacheSnapshotUseCase, GetPendingStatsUseCase};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<GetCacheSnapshotUseCase>,
    pub pending: Arc<GetPendingStatsUseCase>,
}
