use crate::{dto::PendingResponse, state::AppState};
use axum::{extract::State, Json};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_pending")]
pub async fn get_pending(State(state): State<AppState>) -> Json<PendingResponse> {
    let stats = state.pending.execute();
    debug!(in_flight = stats.in_flight, "Pending query count retrieved");
    Json(stats.into())
}
