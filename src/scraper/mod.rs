mod fetch_error;
pub mod models;
mod otodom;

pub use fetch_error::FetchError;
pub use otodom::OtodomScraper;
