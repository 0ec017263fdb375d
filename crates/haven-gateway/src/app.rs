use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use haven_agent::MessagePipeline;
use haven_core::config::HavenConfig;

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub config: HavenConfig,
    pub pipeline: MessagePipeline,
}

impl AppState {
    pub fn new(config: HavenConfig, pipeline: MessagePipeline) -> Self {
        Self { config, pipeline }
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/v1/messages", post(crate::http::messages::message_handler))
        .route("/v1/stats", get(crate::http::stats::stats_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
