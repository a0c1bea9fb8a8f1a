//! Google Maps HTTP adapter for pairwise distances.

use serde::Deserialize;

use crate::traits::{DistanceOracle, OracleError};

#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    pub api_key: String,
    pub base_url: String,
    pub mode: String,
    pub timeout_secs: u64,
}

impl GoogleMapsConfig {
    /// Config with production endpoint defaults. The key is always explicit;
    /// nothing is read from ambient state.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://maps.googleapis.com/maps/api".to_string(),
            mode: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    config: GoogleMapsConfig,
    client: reqwest::blocking::Client,
}

impl GoogleMapsClient {
    pub fn new(config: GoogleMapsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl DistanceOracle for GoogleMapsClient {
    fn distance(&self, from: &str, to: &str) -> Result<f64, OracleError> {
        let url = format!("{}/distancematrix/json", self.config.base_url);

        let body = self
            .client
            .get(url)
            .query(&[
                ("origins", from),
                ("destinations", to),
                ("mode", &self.config.mode),
                ("key", &self.config.api_key),
            ])
            .send()?
            .error_for_status()?
            .json::<DistanceMatrixResponse>()?;

        element_km(&body)
    }
}

/// Extracts the single origin/destination element as kilometers.
fn element_km(body: &DistanceMatrixResponse) -> Result<f64, OracleError> {
    if body.status != "OK" {
        return Err(OracleError::Provider(format!(
            "distance matrix status {}",
            body.status
        )));
    }

    let element = body
        .rows
        .first()
        .and_then(|row| row.elements.first())
        .ok_or_else(|| OracleError::Provider("empty distance matrix response".to_string()))?;

    if element.status != "OK" {
        return Err(OracleError::Provider(format!(
            "element status {}",
            element.status
        )));
    }

    let distance = element
        .distance
        .as_ref()
        .ok_or_else(|| OracleError::Provider("element missing distance".to_string()))?;

    Ok(distance.value / 1000.0)
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<DistanceMatrixRow>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixRow {
    elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixElement {
    status: String,
    distance: Option<DistanceValue>,
}

#[derive(Debug, Deserialize)]
struct DistanceValue {
    /// Meters.
    value: f64,
}
