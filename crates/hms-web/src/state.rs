//! Application state.

use std::sync::Arc;

use hms_core::lab::report::ReportGenerator;
use hms_store::{create_broadcast_channel, BroadcastSender, HmsEvent, StorePool};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: StorePool,
    pub tx: BroadcastSender,
    pub generator: Arc<dyn ReportGenerator>,
}

impl AppState {
    pub fn new(db: StorePool, generator: Arc<dyn ReportGenerator>) -> Self {
        Self {
            db,
            tx: create_broadcast_channel(),
            generator,
        }
    }

    /// Broadcast a message to all WebSocket clients.
    pub fn broadcast(&self, msg: HmsEvent) {
        let _ = self.tx.send(msg);
    }
}
