//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change.

// --- External service defaults (used when env vars are absent) ---

/// Default Overpass API endpoint. Overridden by `OVERPASS_URL`.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
/// Default path of the persisted query cache file. Overridden by `CACHE_PATH`.
pub const DEFAULT_CACHE_PATH: &str = "livability-cache.json";
/// Hard timeout for a single Overpass request.
pub const OVERPASS_QUERY_TIMEOUT_SECONDS: u64 = 60;

// --- Geodesy ---

/// Mean Earth radius in meters, used by the haversine great-circle formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

// --- Amenity index ---

/// Point count above which a category's flat point list is replaced by an
/// R-tree. Below it a linear scan is faster than tree construction plus
/// traversal. Overridden by `SPATIAL_INDEX_THRESHOLD`.
pub const DEFAULT_SPATIAL_INDEX_THRESHOLD: usize = 4_000;

// --- Rating formula ---

/// Assumed constant walking speed when converting distance to travel time.
pub const WALKING_SPEED_METERS_PER_HOUR: f64 = 5_000.0;
/// Ratings are capped at this value ("already close enough").
pub const RATING_CEILING: f64 = 5.0;
/// Travel times below this many minutes receive the full ceiling rating.
pub const RATING_CEILING_MINUTES: f64 = 2.5;
/// Numerator of the hyperbolic falloff: `rating = 12.5 / minutes`.
/// Chosen so the curve meets the ceiling exactly at 2.5 minutes.
pub const RATING_FALLOFF_NUMERATOR: f64 = 12.5;

// --- OSM tag handling ---

/// Tag keys considered when classifying a returned feature into categories.
pub const ACCEPTED_TAG_KEYS: &[&str] = &["amenity", "shop", "healthcare", "highway"];
/// Tag keys folded into the combined regex filter of the Overpass query.
/// Tags with other keys get their own per-tag `node[key=value]` filter line.
pub const REGEX_FILTER_KEYS: &[&str] = &["amenity", "shop", "healthcare"];
