// travel_time.rs
use crate::enrich::{
    blocking_client, EnrichmentError, TravelMode, TravelTimeProvider, NOT_AVAILABLE,
};
use reqwest::blocking::Client;
use serde::Deserialize;

const MATRIX_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Google Distance Matrix lookup, one element per call.
pub struct GoogleMapsMatrix {
    client: Client,
    api_key: String,
}

impl GoogleMapsMatrix {
    pub fn new(api_key: impl Into<String>) -> Result<Self, EnrichmentError> {
        Ok(Self {
            client: blocking_client()?,
            api_key: api_key.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    duration: Option<MatrixDuration>,
}

#[derive(Debug, Deserialize)]
struct MatrixDuration {
    text: String,
}

impl TravelTimeProvider for GoogleMapsMatrix {
    fn travel_time(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        mode: TravelMode,
    ) -> Result<String, EnrichmentError> {
        let origins = format!("{},{}", origin.0, origin.1);
        let destinations = format!("{},{}", destination.0, destination.1);

        let resp = self
            .client
            .get(MATRIX_URL)
            .query(&[
                ("origins", origins.as_str()),
                ("destinations", destinations.as_str()),
                ("mode", mode.as_str()),
                ("departure_time", "now"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .map_err(|e| EnrichmentError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EnrichmentError::Http(format!(
                "distance matrix HTTP {status}"
            )));
        }

        let body: MatrixResponse = resp
            .json()
            .map_err(|e| EnrichmentError::Parse(e.to_string()))?;

        if body.status != "OK" {
            return Err(EnrichmentError::Api(format!(
                "distance matrix status {}",
                body.status
            )));
        }

        let element = body
            .rows
            .first()
            .and_then(|row| row.elements.first())
            .ok_or_else(|| EnrichmentError::Parse("empty distance matrix rows".to_string()))?;

        // A non-OK element is a successful lookup with no route for this
        // mode, not a failure.
        if element.status != "OK" {
            return Ok(NOT_AVAILABLE.to_string());
        }

        element
            .duration
            .as_ref()
            .map(|d| d.text.clone())
            .ok_or_else(|| EnrichmentError::Parse("element missing duration".to_string()))
    }
}
