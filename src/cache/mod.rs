//! Single-entry geodata query cache.
//!
//! At most one `(query, raw response)` pair is alive at a time; a new store
//! replaces the old entry. Validity is exact equality on the query string —
//! no TTL and no bounding-box containment check, so a query for a subset of
//! a cached area is still a miss.

mod file;
mod memory;

pub use file::FileCacheService;
pub use memory::MemoryCacheService;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    pub query: String,
    pub data: String,
}

/// Pluggable persistence behind the loader's cache-or-fetch path.
///
/// `store` is best-effort from the caller's point of view: the loader logs
/// a failed store, clears the entry, and carries on with the fetched data.
#[async_trait]
pub trait QueryCache: Send + Sync {
    async fn load(&self) -> Option<CacheEntry>;
    async fn store(&self, query: &str, data: &str) -> Result<()>;
    async fn clear(&self);
    fn backend_name(&self) -> &'static str;
}
