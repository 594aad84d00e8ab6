use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/cache", get(handlers::get_cache_entries))
        .route("/cache/metrics", get(handlers::get_cache_metrics))
        .route("/pending", get(handlers::get_pending))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
