pub mod catalog;
pub mod coordinates;
pub mod projection;

pub use catalog::{AmenityCategory, Catalog, RatingProfile, TagPair};
pub use coordinates::{BoundingBox, Coordinates};
pub use projection::LocalScale;
