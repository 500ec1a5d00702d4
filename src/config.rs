// config.rs
use crate::errors::AppError;
use std::env;

const OFFERS_DB: &str = "OFFERS_DB";
const GOOGLE_MAPS_API_KEY: &str = "GOOGLE_MAPS_API_KEY";
const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

fn require(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Config(format!("{name} not found in .env file")))
}

/// Path of the offer store, required by every command.
pub fn store_path() -> Result<String, AppError> {
    require(OFFERS_DB)
}

/// Everything the per-offer pass needs. Resolved in full before any
/// network call so that missing configuration aborts with no side effects.
pub struct ProcessConfig {
    pub store_path: String,
    pub maps_api_key: String,
    /// Optional: when present the live summarizer is used, otherwise the
    /// no-op summarizer answers with sentinels.
    pub openai_api_key: Option<String>,
}

impl ProcessConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            store_path: require(OFFERS_DB)?,
            maps_api_key: require(GOOGLE_MAPS_API_KEY)?,
            openai_api_key: env::var(OPENAI_API_KEY).ok(),
        })
    }
}
