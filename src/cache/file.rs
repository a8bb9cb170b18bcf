use crate::cache::{CacheEntry, QueryCache};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// File-backed cache holding the single entry as a JSON document. Survives
/// process restarts, so reopening the same viewport skips the network.
pub struct FileCacheService {
    path: PathBuf,
}

impl FileCacheService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCacheService { path: path.into() }
    }
}

#[async_trait]
impl QueryCache for FileCacheService {
    async fn load(&self) -> Option<CacheEntry> {
        let raw = tokio::fs::read_to_string(&self.path).await.ok()?;
        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Discarding unreadable cache file {:?}: {}", self.path, e);
                None
            }
        }
    }

    async fn store(&self, query: &str, data: &str) -> Result<()> {
        let entry = CacheEntry {
            query: query.to_string(),
            data: data.to_string(),
        };
        let json = serde_json::to_string(&entry)
            .map_err(|e| AppError::Cache(format!("Failed to serialize cache entry: {}", e)))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| AppError::Cache(format!("Failed to write cache file: {}", e)))
    }

    async fn clear(&self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove cache file {:?}: {}", self.path, e);
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
