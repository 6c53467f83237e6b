//! External distance-matrix provider port and HTTP adapter.
//!
//! The provider answers origin/destination lists with a row-major matrix
//! carrying a per-element status. Failures here never fail a route
//! computation; the resolver degrades to the geodesic estimate.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::types::GeoPoint;

/// Provider name used for cache keying of externally resolved distances.
pub const EXTERNAL_PROVIDER: &str = "external";

/// One successfully routed origin/destination pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixElement {
    pub distance_meters: f64,
    pub duration_seconds: i64,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("matrix request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("matrix response status {0}")]
    Status(String),
}

/// Narrow routing-provider interface.
///
/// `None` elements mark pairs the provider could not route; the caller
/// treats them the same as an unavailable provider.
pub trait DistanceProvider {
    fn matrix(
        &self,
        origins: &[GeoPoint],
        destinations: &[GeoPoint],
    ) -> Result<Vec<Vec<Option<MatrixElement>>>, ProviderError>;

    /// Name under which this provider's results are cached.
    fn name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct MatrixClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for MatrixClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl MatrixClientConfig {
    /// Read `DISTANCE_MATRIX_API_BASE` / `DISTANCE_MATRIX_API_KEY` from the
    /// environment.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            base_url: env::var("DISTANCE_MATRIX_API_BASE")?,
            api_key: env::var("DISTANCE_MATRIX_API_KEY")?,
            timeout_secs: Self::default().timeout_secs,
        })
    }
}

/// Blocking HTTP client for a distance-matrix service.
#[derive(Debug, Clone)]
pub struct DistanceMatrixClient {
    config: MatrixClientConfig,
    client: reqwest::blocking::Client,
}

impl DistanceMatrixClient {
    pub fn new(config: MatrixClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl DistanceProvider for DistanceMatrixClient {
    fn matrix(
        &self,
        origins: &[GeoPoint],
        destinations: &[GeoPoint],
    ) -> Result<Vec<Vec<Option<MatrixElement>>>, ProviderError> {
        if origins.is_empty() || destinations.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/distancematrix/json", self.config.base_url);
        let response = self
            .client
            .get(url)
            .query(&[("key", self.config.api_key.as_str())])
            .query(&[("origins", join_coords(origins))])
            .query(&[("destinations", join_coords(destinations))])
            .send()?
            .error_for_status()?;

        let body: MatrixResponse = response.json()?;
        if body.status != "OK" {
            return Err(ProviderError::Status(body.status));
        }

        Ok(flatten_rows(body))
    }

    fn name(&self) -> &str {
        EXTERNAL_PROVIDER
    }
}

fn join_coords(points: &[GeoPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{:.6},{:.6}", p.latitude, p.longitude))
        .collect::<Vec<_>>()
        .join("|")
}

fn flatten_rows(body: MatrixResponse) -> Vec<Vec<Option<MatrixElement>>> {
    body.rows
        .into_iter()
        .map(|row| {
            row.elements
                .into_iter()
                .map(|element| {
                    if element.status != "OK" {
                        return None;
                    }
                    match (element.distance, element.duration) {
                        (Some(distance), Some(duration)) => Some(MatrixElement {
                            distance_meters: distance.value,
                            duration_seconds: duration.value.round() as i64,
                        }),
                        _ => None,
                    }
                })
                .collect()
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<ResponseRow>,
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    elements: Vec<ResponseElement>,
}

#[derive(Debug, Deserialize)]
struct ResponseElement {
    status: String,
    distance: Option<ValueField>,
    duration: Option<ValueField>,
}

#[derive(Debug, Deserialize)]
struct ValueField {
    value: f64,
}
