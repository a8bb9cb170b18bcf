//! Per-category nearest-amenity lookup.
//!
//! Each category holds its projected points either as a flat list scanned
//! linearly or behind an R-tree, chosen once at build time by point count.
//! Both modes compute squared Euclidean distance in the local metric plane
//! and must return identical results for the same point set.

use crate::models::{Coordinates, LocalScale};
use rstar::RTree;
use std::collections::HashMap;

/// Closed variant over the two lookup structures. The mode is fixed at
/// construction and never changes for the lifetime of the index.
#[derive(Debug)]
pub enum CategoryIndex {
    Linear(Vec<[f64; 2]>),
    Spatial(RTree<[f64; 2]>),
}

impl CategoryIndex {
    pub fn build(points: Vec<[f64; 2]>, spatial_threshold: usize) -> Self {
        if points.len() > spatial_threshold {
            CategoryIndex::Spatial(RTree::bulk_load(points))
        } else {
            CategoryIndex::Linear(points)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CategoryIndex::Linear(points) => points.len(),
            CategoryIndex::Spatial(tree) => tree.size(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_spatial(&self) -> bool {
        matches!(self, CategoryIndex::Spatial(_))
    }

    /// Squared distance from `query` to the nearest indexed point, or `None`
    /// for an empty structure.
    pub fn nearest_distance_sq(&self, query: [f64; 2]) -> Option<f64> {
        match self {
            CategoryIndex::Linear(points) => points
                .iter()
                .map(|p| squared_distance(*p, query))
                .fold(None, |min, d| match min {
                    Some(m) if m <= d => Some(m),
                    _ => Some(d),
                }),
            CategoryIndex::Spatial(tree) => tree
                .nearest_neighbor(&query)
                .map(|p| squared_distance(*p, query)),
        }
    }
}

fn squared_distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}

/// Immutable snapshot of indexed amenities for one loaded bounding box.
///
/// Carries the [`LocalScale`] it was projected under, so every distance
/// query runs against the same linearization the points were built with.
/// A reload produces a whole new snapshot; categories that matched no
/// features are absent rather than present with zero points.
#[derive(Debug)]
pub struct AmenityIndex {
    scale: LocalScale,
    categories: HashMap<String, CategoryIndex>,
}

impl AmenityIndex {
    pub fn new(
        scale: LocalScale,
        points_by_category: HashMap<String, Vec<[f64; 2]>>,
        spatial_threshold: usize,
    ) -> Self {
        let categories: HashMap<String, CategoryIndex> = points_by_category
            .into_iter()
            .filter(|(_, points)| !points.is_empty())
            .map(|(name, points)| {
                let index = CategoryIndex::build(points, spatial_threshold);
                tracing::debug!(
                    "Indexed category {}: {} points ({})",
                    name,
                    index.len(),
                    if index.is_spatial() { "r-tree" } else { "linear" }
                );
                (name, index)
            })
            .collect();

        AmenityIndex { scale, categories }
    }

    pub fn scale(&self) -> &LocalScale {
        &self.scale
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn point_count(&self, category: &str) -> Option<usize> {
        self.categories.get(category).map(CategoryIndex::len)
    }

    /// Distance in meters from `coord` to the nearest amenity of `category`,
    /// or `None` if the category matched no features in the loaded box.
    pub fn nearest_distance_meters(&self, category: &str, coord: &Coordinates) -> Option<f64> {
        let index = self.categories.get(category)?;
        let xy = self.scale.to_local_xy(coord);
        index.nearest_distance_sq(xy).map(f64::sqrt)
    }
}
