//! Pluggable seams for travel estimation.
//!
//! The route builder only ever sees [`TravelEstimator`], which is infallible
//! by contract: implementations absorb provider failures and degrade to an
//! estimate rather than surfacing an error mid-route. The raw network seam
//! is [`RouteProvider`], which is fallible and gets wrapped.

use std::fmt;

use crate::model::Coordinate;
use crate::polyline::Polyline;

/// A single leg returned by a routing backend.
#[derive(Debug, Clone)]
pub struct ProviderRoute {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// Road geometry for the leg, when the backend returns one.
    pub geometry: Option<Polyline>,
}

#[derive(Debug)]
pub enum ProviderError {
    Http(reqwest::Error),
    MissingApiKey,
    /// The backend answered but the body contained no usable route.
    EmptyRoute,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Http(err) => write!(f, "routing request failed: {err}"),
            ProviderError::MissingApiKey => write!(f, "routing API key not configured"),
            ProviderError::EmptyRoute => write!(f, "routing response contained no route"),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Http(err)
    }
}

/// A road-network routing backend reachable over HTTP.
///
/// Provider identity, base URL, and credentials are configuration on the
/// implementing type, not part of this contract.
pub trait RouteProvider: Sync {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<ProviderRoute, ProviderError>;
}

/// Where a travel estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateSource {
    /// Real road-network result from a routing backend.
    Provider,
    /// Great-circle approximation.
    Fallback,
}

/// Distance and travel time for one candidate edge.
///
/// Travel time is whole minutes, rounded up, so arrival arithmetic in the
/// route builder stays integral.
#[derive(Debug, Clone, Copy)]
pub struct TravelEstimate {
    pub source: EstimateSource,
    pub distance_km: f64,
    pub travel_minutes: i32,
}

/// Converts two geographic points into a travel distance and duration.
///
/// Implementations never fail: the builder calls this once per candidate
/// edge and a degraded estimate is always preferable to an aborted route.
pub trait TravelEstimator: Sync {
    fn estimate(&self, from: Coordinate, to: Coordinate) -> TravelEstimate;
}
