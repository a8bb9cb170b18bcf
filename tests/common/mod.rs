use async_trait::async_trait;
use livability::cache::{CacheEntry, QueryCache};
use livability::error::{AppError, Result};
use livability::services::GeodataFetcher;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fetcher returning a canned body and counting invocations.
pub struct MockFetcher {
    body: String,
    calls: AtomicUsize,
}

impl MockFetcher {
    pub fn new(body: impl Into<String>) -> Self {
        MockFetcher {
            body: body.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeodataFetcher for MockFetcher {
    async fn fetch(&self, _query: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

/// Fetcher that always fails, for error propagation tests.
pub struct FailingFetcher;

#[async_trait]
impl GeodataFetcher for FailingFetcher {
    async fn fetch(&self, _query: &str) -> Result<String> {
        Err(AppError::OverpassApi("HTTP 504: Gateway Timeout".to_string()))
    }
}

/// Cache whose store always fails, to exercise the best-effort persistence
/// path. Records how often it was cleared.
#[derive(Default)]
pub struct FailingStoreCache {
    cleared: AtomicUsize,
}

impl FailingStoreCache {
    pub fn cleared(&self) -> usize {
        self.cleared.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryCache for FailingStoreCache {
    async fn load(&self) -> Option<CacheEntry> {
        None
    }

    async fn store(&self, _query: &str, _data: &str) -> Result<()> {
        Err(AppError::Cache("Storage quota exceeded".to_string()))
    }

    async fn clear(&self) {
        self.cleared.fetch_add(1, Ordering::SeqCst);
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// An Overpass node element with a single tag.
#[allow(dead_code)]
pub fn node(lat: f64, lon: f64, key: &str, value: &str) -> serde_json::Value {
    json!({"type": "node", "lat": lat, "lon": lon, "tags": {key: value}})
}

/// An Overpass way element with a precomputed center and a single tag.
#[allow(dead_code)]
pub fn way_with_center(lat: f64, lon: f64, key: &str, value: &str) -> serde_json::Value {
    json!({"type": "way", "center": {"lat": lat, "lon": lon}, "tags": {key: value}})
}

pub fn overpass_body(elements: &[serde_json::Value]) -> String {
    json!({ "elements": elements }).to_string()
}
