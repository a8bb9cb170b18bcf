use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub overpass_url: String,
    pub cache_path: String,
    /// Optional JSON catalog replacing the built-in categories/profiles.
    pub catalog_path: Option<String>,
    pub spatial_index_threshold: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            overpass_url: env::var("OVERPASS_URL")
                .unwrap_or_else(|_| DEFAULT_OVERPASS_URL.to_string()),
            cache_path: env::var("CACHE_PATH").unwrap_or_else(|_| DEFAULT_CACHE_PATH.to_string()),
            catalog_path: env::var("CATALOG_PATH").ok(),
            spatial_index_threshold: env::var("SPATIAL_INDEX_THRESHOLD")
                .unwrap_or_else(|_| DEFAULT_SPATIAL_INDEX_THRESHOLD.to_string())
                .parse()
                .map_err(|_| "Invalid SPATIAL_INDEX_THRESHOLD")?,
        })
    }
}
