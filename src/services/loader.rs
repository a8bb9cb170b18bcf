use crate::cache::QueryCache;
use crate::constants::{ACCEPTED_TAG_KEYS, DEFAULT_SPATIAL_INDEX_THRESHOLD};
use crate::error::{AppError, Result};
use crate::models::{BoundingBox, Catalog, LocalScale};
use crate::services::amenity_index::AmenityIndex;
use crate::services::overpass::{build_query, GeodataFetcher, OverpassResponse};
use std::collections::HashMap;
use std::sync::Arc;

/// Builds a fresh [`AmenityIndex`] for a bounding box: project, fetch (or
/// reuse the cached response), classify features into categories, index.
///
/// `load` is all-or-nothing. Any error leaves whatever index the caller
/// currently holds untouched, so stale-but-consistent data stays usable
/// until a reload succeeds.
pub struct AmenityLoader {
    fetcher: Arc<dyn GeodataFetcher>,
    cache: Arc<dyn QueryCache>,
    catalog: Catalog,
    spatial_threshold: usize,
}

impl AmenityLoader {
    pub fn new(
        fetcher: Arc<dyn GeodataFetcher>,
        cache: Arc<dyn QueryCache>,
        catalog: Catalog,
    ) -> Result<Self> {
        catalog.validate()?;
        Ok(AmenityLoader {
            fetcher,
            cache,
            catalog,
            spatial_threshold: DEFAULT_SPATIAL_INDEX_THRESHOLD,
        })
    }

    pub fn with_spatial_threshold(mut self, spatial_threshold: usize) -> Self {
        self.spatial_threshold = spatial_threshold;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn load(&self, bbox: &BoundingBox) -> Result<AmenityIndex> {
        let scale = LocalScale::project(bbox)?;
        let query = build_query(bbox, &self.catalog);
        let raw = self.fetch_cached(&query).await?;

        let response: OverpassResponse = serde_json::from_str(&raw)
            .map_err(|e| AppError::OverpassApi(format!("Failed to parse response: {}", e)))?;

        let mut points: HashMap<String, Vec<[f64; 2]>> = HashMap::new();
        for element in &response.elements {
            for (key, raw_value) in &element.tags {
                if !ACCEPTED_TAG_KEYS.contains(&key.as_str()) {
                    continue;
                }
                // Tag values may be multi-valued; each piece matches
                // independently.
                for value in raw_value.split(|c| c == ';' || c == ',' || c == ' ') {
                    for category in self.catalog.matching_categories(key, value) {
                        let coord = element.representative_coord()?;
                        points
                            .entry(category.name.clone())
                            .or_default()
                            .push(scale.to_local_xy(&coord));
                    }
                }
            }
        }

        let index = AmenityIndex::new(scale, points, self.spatial_threshold);
        tracing::info!(
            "Loaded {} features into {} categories",
            response.elements.len(),
            index.category_count()
        );
        Ok(index)
    }

    /// Return the cached response when the query string matches exactly,
    /// otherwise fetch and try to persist. A failed store clears the cache
    /// and is logged — it never fails the fetch itself.
    async fn fetch_cached(&self, query: &str) -> Result<String> {
        if let Some(entry) = self.cache.load().await {
            if entry.query == query {
                tracing::debug!("Cache hit for Overpass query");
                return Ok(entry.data);
            }
            tracing::debug!("Cached query differs, refetching");
        }

        let data = self.fetcher.fetch(query).await?;

        if let Err(e) = self.cache.store(query, &data).await {
            tracing::warn!("Cannot save fetched geodata to cache: {}", e);
            self.cache.clear().await;
        }

        Ok(data)
    }
}
