pub mod amenity_index;
pub mod heatmap;
pub mod loader;
pub mod overpass;
pub mod rating;

pub use amenity_index::{AmenityIndex, CategoryIndex};
pub use heatmap::{Gradient, HeatmapRenderer};
pub use loader::AmenityLoader;
pub use overpass::{GeodataFetcher, OverpassClient};
pub use rating::RatingEngine;
