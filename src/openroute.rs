//! OpenRouteService HTTP adapter.

use serde::Deserialize;

use crate::model::Coordinate;
use crate::polyline::Polyline;
use crate::traits::{ProviderError, ProviderRoute, RouteProvider};

#[derive(Debug, Clone)]
pub struct OpenRouteConfig {
    pub base_url: String,
    pub api_key: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OpenRouteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openrouteservice.org/v2/directions".to_string(),
            api_key: String::new(),
            profile: "driving-car".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OpenRouteConfig {
    /// Default config with the API key taken from `OPENROUTE_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENROUTE_API_KEY").unwrap_or_default(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenRouteClient {
    config: OpenRouteConfig,
    client: reqwest::blocking::Client,
}

impl OpenRouteClient {
    pub fn new(config: OpenRouteConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl RouteProvider for OpenRouteClient {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<ProviderRoute, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        let url = format!("{}/{}", self.config.base_url, self.config.profile);
        let body = self
            .client
            .get(url)
            .query(&[
                ("api_key", self.config.api_key.clone()),
                ("start", format!("{:.6},{:.6}", from.longitude, from.latitude)),
                ("end", format!("{:.6},{:.6}", to.longitude, to.latitude)),
            ])
            .send()?
            .error_for_status()?
            .json::<DirectionsResponse>()?;

        let feature = body
            .features
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyRoute)?;
        let segment = feature
            .properties
            .segments
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyRoute)?;
        let geometry = feature
            .geometry
            .map(|geometry| Polyline::from_lnglat(geometry.coordinates));

        Ok(ProviderRoute {
            distance_meters: segment.distance,
            duration_seconds: segment.duration,
            geometry,
        })
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<DirectionsFeature>,
}

#[derive(Debug, Deserialize)]
struct DirectionsFeature {
    properties: FeatureProperties,
    geometry: Option<FeatureGeometry>,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct FeatureGeometry {
    coordinates: Vec<[f64; 2]>,
}
