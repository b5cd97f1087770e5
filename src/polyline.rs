//! Route geometry as a decoded coordinate sequence.
//!
//! Routing backends return leg geometry in GeoJSON [longitude, latitude]
//! order; internally points are stored (latitude, longitude). Compact
//! polyline encoding, if a frontend needs it, happens at the API boundary,
//! not here.

use serde::{Deserialize, Serialize};

/// A route leg geometry as decoded (latitude, longitude) points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a polyline from (latitude, longitude) points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Creates a polyline from GeoJSON-ordered [longitude, latitude] pairs.
    pub fn from_lnglat(coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            points: coordinates.into_iter().map(|[lng, lat]| (lat, lng)).collect(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}
