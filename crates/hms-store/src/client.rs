//! Storage backends and pool management.
//!
//! Every entity is stored as a JSON document inside a named collection and
//! indexed by a numeric score that fixes listing order. Two backends share the
//! same contract: Redis for durable deployments and an in-memory map for
//! volatile sessions and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Key prefix for every Redis key written by HMS.
const KEY_PREFIX: &str = "hms";

/// Store error types.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A document store with ordered collections and id sequences.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Insert or replace a document.
    async fn put(&self, collection: &str, id: &str, data: String, score: i64) -> StoreResult<()>;

    /// Fetch a single document.
    async fn fetch(&self, collection: &str, id: &str) -> StoreResult<Option<String>>;

    /// Fetch every document of a collection, ordered by ascending score.
    async fn fetch_all(&self, collection: &str) -> StoreResult<Vec<String>>;

    /// Next value of a named sequence, starting at 1.
    async fn next_sequence(&self, name: &str) -> StoreResult<u64>;

    /// Short backend name for logs.
    fn kind(&self) -> &'static str;
}

/// Shared handle to the configured backend.
pub type StorePool = Arc<dyn Backend>;

/// Redis backend. `ConnectionManager` multiplexes internally and is cheap to clone.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    /// Connect to Redis.
    ///
    /// Example URL: `redis://127.0.0.1:6379`
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    fn doc_key(collection: &str, id: &str) -> String {
        format!("{}:{}:{}", KEY_PREFIX, collection, id)
    }

    fn index_key(collection: &str) -> String {
        format!("{}:{}:all", KEY_PREFIX, collection)
    }
}

#[async_trait]
impl Backend for RedisBackend {
    async fn put(&self, collection: &str, id: &str, data: String, score: i64) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.hset::<_, _, _, ()>(Self::doc_key(collection, id), "data", data).await?;
        conn.zadd::<_, _, _, ()>(Self::index_key(collection), id, score).await?;
        Ok(())
    }

    async fn fetch(&self, collection: &str, id: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        let json: Option<String> = conn.hget(Self::doc_key(collection, id), "data").await?;
        Ok(json)
    }

    async fn fetch_all(&self, collection: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.zrange(Self::index_key(collection), 0, -1).await?;
        let mut docs = Vec::with_capacity(ids.len());
        for id in ids {
            let json: Option<String> = conn.hget(Self::doc_key(collection, &id), "data").await?;
            match json {
                Some(j) => docs.push(j),
                None => debug!(collection, id = %id, "Index entry without document, skipping"),
            }
        }
        Ok(docs)
    }

    async fn next_sequence(&self, name: &str) -> StoreResult<u64> {
        let mut conn = self.conn.clone();
        let key = format!("{}:seq:{}", KEY_PREFIX, name);
        let value: u64 = conn.incr(key, 1u64).await?;
        Ok(value)
    }

    fn kind(&self) -> &'static str {
        "redis"
    }
}

/// Volatile backend. Data lives for the lifetime of the process.
#[derive(Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, HashMap<String, (i64, String)>>>,
    sequences: RwLock<HashMap<String, u64>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn put(&self, collection: &str, id: &str, data: String, score: i64) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), (score, data));
        Ok(())
    }

    async fn fetch(&self, collection: &str, id: &str) -> StoreResult<Option<String>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|(_, data)| data.clone()))
    }

    async fn fetch_all(&self, collection: &str) -> StoreResult<Vec<String>> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<(&String, &(i64, String))> = docs.iter().collect();
        entries.sort_by(|(a_id, (a_score, _)), (b_id, (b_score, _))| {
            a_score.cmp(b_score).then_with(|| a_id.cmp(b_id))
        });
        Ok(entries.into_iter().map(|(_, (_, data))| data.clone()).collect())
    }

    async fn next_sequence(&self, name: &str) -> StoreResult<u64> {
        let mut sequences = self.sequences.write().await;
        let value = sequences.entry(name.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

/// Initialize a Redis-backed pool from a URL.
pub async fn init_pool(redis_url: &str) -> StoreResult<StorePool> {
    let backend = RedisBackend::connect(redis_url).await?;
    Ok(Arc::new(backend))
}

/// Create a fresh in-memory pool.
pub fn in_memory() -> StorePool {
    Arc::new(MemoryBackend::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_put_and_fetch() {
        let pool = in_memory();
        pool.put("doctors", "doc1", "{\"a\":1}".to_string(), 1).await.unwrap();

        let doc = pool.fetch("doctors", "doc1").await.unwrap();
        assert_eq!(doc.as_deref(), Some("{\"a\":1}"));
        assert!(pool.fetch("doctors", "doc2").await.unwrap().is_none());
        assert!(pool.fetch("patients", "doc1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_fetch_all_orders_by_score() {
        let pool = in_memory();
        pool.put("c", "b", "second".to_string(), 2).await.unwrap();
        pool.put("c", "c", "third".to_string(), 10).await.unwrap();
        pool.put("c", "a", "first".to_string(), 1).await.unwrap();

        let docs = pool.fetch_all("c").await.unwrap();
        assert_eq!(docs, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_memory_put_replaces() {
        let pool = in_memory();
        pool.put("c", "a", "old".to_string(), 1).await.unwrap();
        pool.put("c", "a", "new".to_string(), 1).await.unwrap();

        assert_eq!(pool.fetch_all("c").await.unwrap(), vec!["new"]);
    }

    #[tokio::test]
    async fn test_memory_sequences_are_independent() {
        let pool = in_memory();
        assert_eq!(pool.next_sequence("patients").await.unwrap(), 1);
        assert_eq!(pool.next_sequence("patients").await.unwrap(), 2);
        assert_eq!(pool.next_sequence("doctors").await.unwrap(), 1);
        assert_eq!(pool.kind(), "memory");
    }
}
