use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::info;

use super::KvStore;
use crate::errors::{LinkgateError, Result};

/// Redis backend. Keys live under a configurable prefix so the service
/// can share a database with other tenants.
pub struct RedisStorage {
    manager: ConnectionManager,
    prefix: String,
}

impl RedisStorage {
    pub async fn new_async(url: &str, prefix: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| LinkgateError::storage_connection(e.to_string()))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| LinkgateError::storage_connection(e.to_string()))?;

        info!("Connected to Redis at {}", url);
        Ok(Self {
            manager,
            prefix: prefix.to_string(),
        })
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[async_trait]
impl KvStore for RedisStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(self.prefixed(key)).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.set(self.prefixed(key), value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.del(self.prefixed(key)).await?;
        Ok(())
    }

    async fn keys(&self, limit: usize) -> Result<Vec<String>> {
        let mut conn = self.manager.clone();
        let pattern = format!("{}*", self.prefix);
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;

        // Cursor-based SCAN so listing never blocks the server.
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await?;

            for key in batch {
                if keys.len() >= limit {
                    return Ok(keys);
                }
                let stripped = key
                    .strip_prefix(&self.prefix)
                    .unwrap_or(key.as_str())
                    .to_string();
                keys.push(stripped);
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(keys)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
