use crate::{
    dto::{CacheEntryResponse, CacheMetricsResponse},
    state::AppState,
};
use axum::{extract::State, Json};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_cache_entries")]
pub async fn get_cache_entries(State(state): State<AppState>) -> Json<Vec<CacheEntryResponse>> {
    let entries = state.cache.entries();
    debug!(count = entries.len(), "Cache entries retrieved");
    Json(entries.into_iter().map(CacheEntryResponse::from).collect())
}

#[instrument(skip(state), name = "api_get_cache_metrics")]
pub async fn get_cache_metrics(State(state): State<AppState>) -> Json<CacheMetricsResponse> {
    let snapshot = state.cache.metrics();

    debug!(
        total_entries = snapshot.total_entries,
        hits = snapshot.hits,
        misses = snapshot.misses,
        hit_rate = snapshot.hit_rate,
        "Cache metrics retrieved"
    );

    Json(snapshot.into())
}
