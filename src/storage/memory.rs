use async_trait::async_trait;
use dashmap::DashMap;

use super::KvStore;
use crate::errors::Result;

/// In-memory backend. Nothing survives a restart; used for tests and
/// throwaway deployments.
#[derive(Default)]
pub struct MemoryStorage {
    entries: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn keys(&self, limit: usize) -> Result<Vec<String>> {
        Ok(self
            .entries
            .iter()
            .take(limit)
            .map(|e| e.key().clone())
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
