//! Rating heatmap rasterization.
//!
//! Samples the profile-averaged rating at every pixel center of a grid
//! covering a bounding box and maps it through a color gradient. Output is
//! row-major RGBA with the top row on the box's north edge.

use crate::constants::RATING_CEILING;
use crate::error::Result;
use crate::models::{BoundingBox, Coordinates, RatingProfile};
use crate::services::amenity_index::AmenityIndex;
use crate::services::rating::RatingEngine;

/// Evenly spaced color stops of the default ramp, cold to hot: transparent,
/// blue, cyan, lime, yellow, orange, red.
pub const DEFAULT_GRADIENT_STOPS: &[[u8; 4]] = &[
    [0, 0, 0, 0],
    [0, 0, 255, 255],
    [0, 255, 255, 255],
    [0, 255, 0, 255],
    [255, 255, 0, 255],
    [255, 165, 0, 255],
    [255, 0, 0, 255],
];

/// 256-entry RGBA lookup table linearly interpolated between evenly spaced
/// stops, the raster analogue of a 1x256 canvas gradient strip.
pub struct Gradient {
    lut: [[u8; 4]; 256],
}

impl Gradient {
    pub fn from_stops(stops: &[[u8; 4]]) -> Self {
        let mut lut = [[0u8; 4]; 256];
        if stops.is_empty() {
            return Gradient { lut };
        }
        if stops.len() == 1 {
            lut = [stops[0]; 256];
            return Gradient { lut };
        }

        let segments = stops.len() - 1;
        for (i, entry) in lut.iter_mut().enumerate() {
            let position = i as f64 / 255.0 * segments as f64;
            let segment = (position.floor() as usize).min(segments - 1);
            let t = position - segment as f64;
            let from = stops[segment];
            let to = stops[segment + 1];
            for channel in 0..4 {
                entry[channel] = (from[channel] as f64
                    + (to[channel] as f64 - from[channel] as f64) * t)
                    .round() as u8;
            }
        }
        Gradient { lut }
    }

    pub fn color(&self, level: u8) -> [u8; 4] {
        self.lut[level as usize]
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Gradient::from_stops(DEFAULT_GRADIENT_STOPS)
    }
}

pub struct HeatmapRenderer {
    gradient: Gradient,
}

impl HeatmapRenderer {
    pub fn new(gradient: Gradient) -> Self {
        HeatmapRenderer { gradient }
    }

    /// Rasterize the averaged rating of `profile` over `bbox` into a
    /// `width * height * 4` RGBA buffer. Each pixel samples the rating at
    /// its geographic center; ratings are clamped to `[0, 5]` and
    /// normalized to the gradient's 0..=255 range.
    pub fn render(
        &self,
        bbox: &BoundingBox,
        width: usize,
        height: usize,
        index: &AmenityIndex,
        profile: &RatingProfile,
    ) -> Result<Vec<u8>> {
        let mut data = vec![0u8; width * height * 4];
        if width == 0 || height == 0 {
            return Ok(data);
        }

        let half_lat_step = bbox.lat_span() / 2.0 / height as f64;
        let half_lng_step = bbox.lng_span() / 2.0 / width as f64;

        let mut offset = 0;
        let mut lat = bbox.north - half_lat_step;
        for _row in 0..height {
            let mut lng = bbox.west + half_lng_step;
            for _col in 0..width {
                let coord = Coordinates { lat, lng };
                let rating = RatingEngine::profile_rating(index, profile, &coord);
                let level = (rating / RATING_CEILING * 255.0).clamp(0.0, 255.0).trunc() as u8;
                data[offset..offset + 4].copy_from_slice(&self.gradient.color(level));
                offset += 4;
                lng += 2.0 * half_lng_step;
            }
            lat -= 2.0 * half_lat_step;
        }

        Ok(data)
    }
}

impl Default for HeatmapRenderer {
    fn default() -> Self {
        HeatmapRenderer::new(Gradient::default())
    }
}
