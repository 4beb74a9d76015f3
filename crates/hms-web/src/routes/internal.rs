//! Internal notification endpoints.

use axum::{extract::State, http::StatusCode, Json};
use hms_store::HmsEvent;
use tracing::{debug, info};

use crate::state::AppState;

/// Receive an event from another process and broadcast it to dashboards.
pub async fn notify(
    State(state): State<AppState>,
    Json(msg): Json<HmsEvent>,
) -> StatusCode {
    info!(?msg, "Received internal notification, broadcasting to WebSocket clients");
    let receiver_count = state.tx.receiver_count();
    debug!(receiver_count, "Active WebSocket receivers");
    state.broadcast(msg);
    StatusCode::OK
}
