use crate::cache::{CacheEntry, QueryCache};
use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// In-memory single-slot cache. Used for cacheless runs and as a test
/// double; nothing survives the process.
#[derive(Default)]
pub struct MemoryCacheService {
    entry: Mutex<Option<CacheEntry>>,
}

impl MemoryCacheService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueryCache for MemoryCacheService {
    async fn load(&self) -> Option<CacheEntry> {
        self.entry.lock().await.clone()
    }

    async fn store(&self, query: &str, data: &str) -> Result<()> {
        *self.entry.lock().await = Some(CacheEntry {
            query: query.to_string(),
            data: data.to_string(),
        });
        Ok(())
    }

    async fn clear(&self) {
        *self.entry.lock().await = None;
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty() {
        let cache = MemoryCacheService::new();
        assert!(cache.load().await.is_none());
    }

    #[tokio::test]
    async fn single_slot_semantics() {
        let cache = MemoryCacheService::new();
        cache.store("a", "1").await.unwrap();
        cache.store("b", "2").await.unwrap();

        // Only the most recent entry survives
        let entry = cache.load().await.unwrap();
        assert_eq!(entry.query, "b");

        cache.clear().await;
        assert!(cache.load().await.is_none());
    }
}
