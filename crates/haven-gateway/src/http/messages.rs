use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use haven_core::types::InboundMessage;

use crate::app::AppState;

#[derive(Serialize)]
pub struct MessageResponse {
    /// Outgoing text for the sender. Empty means "send nothing" — the
    /// message was blank, a duplicate, or otherwise dropped.
    pub reply: String,
}

/// POST /v1/messages — deliver one inbound transport message to the
/// pipeline and return the text to send back.
pub async fn message_handler(
    State(state): State<Arc<AppState>>,
    Json(msg): Json<InboundMessage>,
) -> Json<MessageResponse> {
    let reply = state.pipeline.handle(&msg).await;
    Json(MessageResponse { reply })
}
