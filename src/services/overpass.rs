use crate::constants::{OVERPASS_QUERY_TIMEOUT_SECONDS, REGEX_FILTER_KEYS};
use crate::error::{AppError, Result};
use crate::models::{BoundingBox, Catalog, Coordinates};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

/// Seam between the loader and the network. The production implementation is
/// [`OverpassClient`]; tests substitute a canned fetcher to count calls.
#[async_trait]
pub trait GeodataFetcher: Send + Sync {
    /// Execute an Overpass QL query and return the raw JSON response body.
    async fn fetch(&self, query: &str) -> Result<String>;
}

pub struct OverpassClient {
    client: Client,
    endpoint: String,
}

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        OverpassClient {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl GeodataFetcher for OverpassClient {
    /// Single-attempt fetch. Failures propagate to the caller as-is; retry
    /// policy belongs to whoever drives the load.
    async fn fetch(&self, query: &str) -> Result<String> {
        tracing::debug!("Overpass query: {}", query);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(format!("data={}", urlencoding::encode(query)))
            .timeout(std::time::Duration::from_secs(
                OVERPASS_QUERY_TIMEOUT_SECONDS,
            ))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::OverpassApi("Request timed out".to_string())
                } else {
                    AppError::OverpassApi(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::OverpassApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::OverpassApi(format!("Failed to read response: {}", e)))
    }
}

/// Build the Overpass QL query for every configured category within a box.
///
/// Tags whose key participates in the combined regex filter are folded into
/// one `~"^(k1|k2)$"~"^(v1|v2)$"` condition applied to nodes, ways and
/// relations; other tags (e.g. `highway=bus_stop`) each get their own
/// node-only filter line. Ways and relations are asked for `out center` so
/// every feature carries a representative coordinate.
///
/// The byte-exact output doubles as the cache key, so keys and values keep
/// their first-seen order.
pub fn build_query(bbox: &BoundingBox, catalog: &Catalog) -> String {
    let mut query = format!(
        "[out:json][bbox:{},{},{},{}];(\n",
        bbox.south, bbox.west, bbox.north, bbox.east
    );

    let mut keys: Vec<&str> = Vec::new();
    let mut values: Vec<&str> = Vec::new();
    for category in &catalog.categories {
        for tag in &category.tags {
            if !REGEX_FILTER_KEYS.contains(&tag.key.as_str()) {
                query.push_str(&format!("node[{}={}];\n", tag.key, tag.value));
                continue;
            }
            if !keys.contains(&tag.key.as_str()) {
                keys.push(&tag.key);
            }
            if !values.contains(&tag.value.as_str()) {
                values.push(&tag.value);
            }
        }
    }

    let cond = format!("~\"^({})$\"~\"^({})$\"", keys.join("|"), values.join("|"));
    query.push_str(&format!("node[{}];\n", cond));
    query.push_str(&format!("way[{}];\n", cond));
    query.push_str(&format!("relation[{}];\n", cond));
    query.push_str(");out center;");
    query
}

// Overpass API response types

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    /// The feature's representative coordinate: a node's own position, or
    /// the precomputed center of a way/relation. A way or relation without
    /// center data is a hard error — skipping it would leave a category's
    /// point set silently incomplete.
    pub fn representative_coord(&self) -> Result<Coordinates> {
        match self.kind.as_str() {
            "node" => match (self.lat, self.lon) {
                (Some(lat), Some(lon)) => {
                    Coordinates::new(lat, lon).map_err(AppError::DataIntegrity)
                }
                _ => Err(AppError::DataIntegrity(
                    "Node without coordinates".to_string(),
                )),
            },
            "way" | "relation" => match &self.center {
                Some(center) => {
                    Coordinates::new(center.lat, center.lon).map_err(AppError::DataIntegrity)
                }
                None => Err(AppError::DataIntegrity(format!(
                    "No center data provided for {}",
                    self.kind
                ))),
            },
            other => Err(AppError::DataIntegrity(format!(
                "Invalid element type: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox() -> BoundingBox {
        BoundingBox::new(55.70, 37.50, 55.80, 37.70).unwrap()
    }

    #[test]
    fn test_build_query_shape() {
        let query = build_query(&bbox(), &Catalog::default());

        assert!(query.starts_with("[out:json][bbox:55.7,37.5,55.8,37.7];(\n"));
        assert!(query.ends_with(");out center;"));
        // Combined regex filter covers all three element kinds
        assert!(query.contains("node[~\"^(shop|amenity|healthcare)$\""));
        assert!(query.contains("way[~\"^(shop|amenity|healthcare)$\""));
        assert!(query.contains("relation[~\"^(shop|amenity|healthcare)$\""));
        // Values are collected across categories
        assert!(query.contains("supermarket"));
        assert!(query.contains("nightclub"));
    }

    #[test]
    fn test_build_query_deduplicates_values() {
        let query = build_query(&bbox(), &Catalog::default());
        // `pharmacy` appears under both amenity and healthcare keys but only
        // once in the value alternation
        assert_eq!(query.matches("pharmacy").count(), 1);
    }

    #[test]
    fn test_build_query_non_regex_key_gets_own_line() {
        let mut catalog = Catalog::default();
        catalog.categories.push(crate::models::AmenityCategory {
            name: "transit".to_string(),
            label: "Public transport stops".to_string(),
            tags: vec![crate::models::TagPair::new("highway", "bus_stop")],
        });

        let query = build_query(&bbox(), &catalog);
        assert!(query.contains("node[highway=bus_stop];\n"));
        // highway never joins the combined regex keys
        assert!(!query.contains("^(shop|amenity|healthcare|highway)$"));
    }

    #[test]
    fn test_build_query_is_deterministic() {
        let catalog = Catalog::default();
        assert_eq!(build_query(&bbox(), &catalog), build_query(&bbox(), &catalog));
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "elements": [
                {"type": "node", "id": 1, "lat": 55.75, "lon": 37.61,
                 "tags": {"amenity": "pharmacy"}},
                {"type": "way", "id": 2, "center": {"lat": 55.76, "lon": 37.62},
                 "tags": {"shop": "supermarket"}},
                {"type": "relation", "id": 3, "tags": {"amenity": "school"}}
            ]
        }"#;

        let response: OverpassResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.elements.len(), 3);

        let node = response.elements[0].representative_coord().unwrap();
        assert_eq!(node, Coordinates { lat: 55.75, lng: 37.61 });

        let way = response.elements[1].representative_coord().unwrap();
        assert_eq!(way, Coordinates { lat: 55.76, lng: 37.62 });

        // Relation without center is a data integrity error
        let err = response.elements[2].representative_coord().unwrap_err();
        assert!(matches!(err, AppError::DataIntegrity(_)));
    }

    #[test]
    fn test_element_without_tags_parses() {
        let raw = r#"{"elements": [{"type": "node", "lat": 1.0, "lon": 2.0}]}"#;
        let response: OverpassResponse = serde_json::from_str(raw).unwrap();
        assert!(response.elements[0].tags.is_empty());
    }
}
