use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{error, info};

use super::KvStore;
use crate::errors::{LinkgateError, Result};

/// JSON-file backend with a write-through in-memory map.
///
/// The file holds a single object mapping short paths to their raw stored
/// values. Every mutation rewrites the file; reads are served from memory.
pub struct FileStorage {
    file_path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    pub fn new(path: &str) -> Result<Self> {
        let storage = FileStorage {
            file_path: PathBuf::from(path),
            cache: RwLock::new(HashMap::new()),
        };

        let entries = storage.load_from_file()?;
        {
            let mut cache = storage.cache.write().unwrap();
            info!("FileStorage loaded {} links from {}", entries.len(), path);
            *cache = entries;
        }

        Ok(storage)
    }

    fn load_from_file(&self) -> Result<HashMap<String, String>> {
        match fs::read_to_string(&self.file_path) {
            Ok(content) => {
                serde_json::from_str::<HashMap<String, String>>(&content).map_err(|e| {
                    error!("Failed to parse links file: {}", e);
                    LinkgateError::serialization(format!("Failed to parse links file: {e}"))
                })
            }
            Err(_) => {
                if let Err(e) = fs::write(&self.file_path, "{}") {
                    error!("Failed to create links file: {}", e);
                    return Err(LinkgateError::storage_operation(format!(
                        "Failed to create links file: {e}"
                    )));
                }
                info!("Created empty links file: {}", self.file_path.display());
                Ok(HashMap::new())
            }
        }
    }

    fn save_to_file(&self, entries: &HashMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }
}

#[async_trait]
impl KvStore for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let cache = self.cache.read().unwrap();
        Ok(cache.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut cache = self.cache.write().unwrap();
        cache.insert(key.to_string(), value.to_string());
        self.save_to_file(&cache)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut cache = self.cache.write().unwrap();
        if cache.remove(key).is_some() {
            self.save_to_file(&cache)?;
        }
        Ok(())
    }

    async fn keys(&self, limit: usize) -> Result<Vec<String>> {
        let cache = self.cache.read().unwrap();
        Ok(cache.keys().take(limit).cloned().collect())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store(dir: &TempDir) -> FileStorage {
        let path = dir.path().join("links.json");
        FileStorage::new(path.to_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        assert!(store.keys(10).await.unwrap().is_empty());
        assert!(dir.path().join("links.json").exists());
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("links.json");
        {
            let store = FileStorage::new(path.to_str().unwrap()).unwrap();
            store
                .put("promo", "{\"url\":\"https://example.com\"}")
                .await
                .unwrap();
        }
        let reopened = FileStorage::new(path.to_str().unwrap()).unwrap();
        assert_eq!(
            reopened.get("promo").await.unwrap().as_deref(),
            Some("{\"url\":\"https://example.com\"}")
        );
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.put("a", "v").await.unwrap();
        store.delete("a").await.unwrap();
        assert!(store.delete("a").await.is_ok());
        assert!(store.get("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("links.json");
        fs::write(&path, "not json").unwrap();
        assert!(FileStorage::new(path.to_str().unwrap()).is_err());
    }
}
