//! Travel estimators: great-circle fallback and provider-backed primary.
//!
//! [`GreatCircle`] is always available and needs no network. It ignores the
//! road network, so it understates distance in cities, but a degraded
//! estimate never aborts an optimization run.

use crate::model::Coordinate;
use crate::traits::{EstimateSource, RouteProvider, TravelEstimate, TravelEstimator};

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 50.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle (haversine) travel estimator.
///
/// Travel time is straight-line distance at an assumed average speed,
/// rounded up to whole minutes.
#[derive(Debug, Clone)]
pub struct GreatCircle {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for GreatCircle {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl GreatCircle {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Haversine distance between two points in kilometers.
    pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
        let lat1_rad = from.latitude.to_radians();
        let lat2_rad = to.latitude.to_radians();
        let delta_lat = (to.latitude - from.latitude).to_radians();
        let delta_lng = (to.longitude - from.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    /// Travel minutes for a distance at the assumed speed, rounded up.
    fn km_to_minutes(&self, km: f64) -> i32 {
        (km / self.speed_kmh * 60.0).ceil() as i32
    }
}

impl TravelEstimator for GreatCircle {
    fn estimate(&self, from: Coordinate, to: Coordinate) -> TravelEstimate {
        let distance_km = Self::distance_km(from, to);
        TravelEstimate {
            source: EstimateSource::Fallback,
            distance_km,
            travel_minutes: self.km_to_minutes(distance_km),
        }
    }
}

/// Provider-backed estimator with a silent great-circle fallback.
///
/// The primary path asks the routing backend for real road distance and
/// duration. Any provider failure (timeout, non-2xx, malformed body,
/// missing credentials) logs a warning and substitutes the great-circle
/// estimate; the caller never sees an error.
#[derive(Debug, Clone)]
pub struct ProviderEstimator<P> {
    provider: P,
    fallback: GreatCircle,
}

impl<P: RouteProvider> ProviderEstimator<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            fallback: GreatCircle::default(),
        }
    }

    pub fn with_fallback(provider: P, fallback: GreatCircle) -> Self {
        Self { provider, fallback }
    }
}

impl<P: RouteProvider> TravelEstimator for ProviderEstimator<P> {
    fn estimate(&self, from: Coordinate, to: Coordinate) -> TravelEstimate {
        match self.provider.route(from, to) {
            Ok(route) => TravelEstimate {
                source: EstimateSource::Provider,
                distance_km: route.distance_meters / 1000.0,
                travel_minutes: (route.duration_seconds / 60.0).ceil() as i32,
            },
            Err(err) => {
                tracing::warn!(error = %err, "routing provider failed, using great-circle estimate");
                self.fallback.estimate(from, to)
            }
        }
    }
}
