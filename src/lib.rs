//! Amenity proximity rating engine.
//!
//! Rates how livable a point is by walking time to the nearest amenity in
//! each of a profile's categories, over geodata fetched from the Overpass
//! API for a bounding box. The loader produces an immutable per-box
//! [`services::AmenityIndex`] snapshot; the rating engine and heatmap
//! renderer read it without further network or shared state.

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};
