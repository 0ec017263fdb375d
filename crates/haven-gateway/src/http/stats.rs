use axum::{extract::State, Json};
use std::sync::Arc;

use haven_store::StoreStats;

use crate::app::AppState;

/// GET /v1/stats — conversation store occupancy for monitoring.
pub async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<StoreStats> {
    Json(state.pipeline.stats())
}
