//! HMS Store
//!
//! Persistence for the hospital management service. Documents live in Redis
//! when a URL is configured and in process memory otherwise.

pub mod broadcast;
pub mod client;
pub mod queries;

pub use broadcast::{BroadcastReceiver, BroadcastSender, HmsEvent, create_broadcast_channel};
pub use client::{
    Backend, MemoryBackend, RedisBackend, StoreError, StorePool, StoreResult, in_memory, init_pool,
};
pub use queries::{appointments, bills, doctors, lab, next_id, opd, patients, prescriptions, records};

/// Open a pool for the given Redis URL, or an in-memory pool when none is set.
pub async fn open(redis_url: Option<&str>) -> StoreResult<StorePool> {
    match redis_url {
        Some(url) => {
            let pool = init_pool(url).await?;
            tracing::info!(backend = pool.kind(), "Connected to store");
            Ok(pool)
        }
        None => {
            tracing::warn!("No Redis URL configured, using volatile in-memory store");
            Ok(in_memory())
        }
    }
}
