//! Key-value storage backends
//!
//! Links are stored as raw JSON strings keyed by their short path, the
//! same layout the service used on its original KV namespace. Backends
//! only move strings; parsing into [`LinkRecord`] happens in the service
//! layer so a corrupt value degrades that one key instead of the backend.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::StorageConfig;
use crate::errors::{LinkgateError, Result};

pub mod file;
pub mod memory;
pub mod models;
pub mod redis;

pub use models::{LinkMetadata, LinkRecord};

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Raw value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: &str) -> Result<()>;
    /// Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
    /// Up to `limit` stored keys, in unspecified order.
    async fn keys(&self, limit: usize) -> Result<Vec<String>>;
    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn KvStore>> {
        let boxed: Box<dyn KvStore> = match config.backend.as_str() {
            "memory" => Box::new(memory::MemoryStorage::new()),
            "redis" => Box::new(
                redis::RedisStorage::new_async(&config.redis_url, &config.redis_prefix).await?,
            ),
            "file" => Box::new(file::FileStorage::new(&config.file_path)?),
            other => {
                return Err(LinkgateError::config(format!(
                    "Unknown storage backend: {other}"
                )));
            }
        };

        Ok(Arc::from(boxed))
    }
}
