mod summary;
mod travel_time;

pub use summary::{NoopSummarizer, OpenAiSummarizer};
pub use travel_time::GoogleMapsMatrix;

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Sentinel for enrichment fields that could not be populated.
pub const NOT_AVAILABLE: &str = "N/A";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Walking,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Transit => "transit",
        }
    }
}

/// A provider call that failed. Never fatal: callers degrade the
/// affected field(s) to the sentinel and keep going.
#[derive(Debug)]
pub enum EnrichmentError {
    Http(String),
    Api(String),
    Parse(String),
}

impl fmt::Display for EnrichmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrichmentError::Http(msg) => write!(f, "HTTP error: {msg}"),
            EnrichmentError::Api(msg) => write!(f, "API error: {msg}"),
            EnrichmentError::Parse(msg) => write!(f, "Response parse error: {msg}"),
        }
    }
}

impl std::error::Error for EnrichmentError {}

/// Duration lookup between a station and an offer.
pub trait TravelTimeProvider {
    /// Human-readable duration ("12 mins"), or the sentinel when the
    /// service answers but finds no route for this mode. Transport and
    /// API failures are `Err`.
    fn travel_time(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        mode: TravelMode,
    ) -> Result<String, EnrichmentError>;
}

/// The three summary fields derived from an offer description.
#[derive(Debug, Clone, Deserialize)]
pub struct OfferSummary {
    pub available_from: String,
    pub total_monthly_cost: String,
    pub key_advantages: String,
}

impl OfferSummary {
    pub fn not_available() -> Self {
        Self {
            available_from: NOT_AVAILABLE.to_string(),
            total_monthly_cost: NOT_AVAILABLE.to_string(),
            key_advantages: NOT_AVAILABLE.to_string(),
        }
    }
}

pub trait SummaryProvider {
    fn summarize(&self, description: &str) -> Result<OfferSummary, EnrichmentError>;
}

fn blocking_client() -> Result<reqwest::blocking::Client, EnrichmentError> {
    reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| EnrichmentError::Http(e.to_string()))
}
