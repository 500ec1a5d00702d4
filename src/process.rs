// process.rs
use crate::config::ProcessConfig;
use crate::db::connection::Database;
use crate::db::offers;
use crate::domain::OfferExtractor;
use crate::enrich::{GoogleMapsMatrix, NoopSummarizer, OpenAiSummarizer, SummaryProvider};
use crate::errors::AppError;
use crate::geo::StationIndex;
use crate::scraper::OtodomScraper;
use log::info;

/// The per-offer pass: fetch one offer by slug, normalize it, append it
/// to the sink.
pub fn run_process(config: &ProcessConfig, db: &Database, slug: &str) -> Result<(), AppError> {
    let scraper = OtodomScraper::new()?;
    let stations = StationIndex::warsaw();

    let travel_times = GoogleMapsMatrix::new(&config.maps_api_key)
        .map_err(|e| AppError::Config(format!("travel-time client setup failed: {e}")))?;

    let summaries: Box<dyn SummaryProvider> = match &config.openai_api_key {
        Some(key) => Box::new(
            OpenAiSummarizer::new(key)
                .map_err(|e| AppError::Config(format!("summarizer setup failed: {e}")))?,
        ),
        None => Box::new(NoopSummarizer),
    };

    info!("📄 Fetching offer {slug}");
    let ad = scraper.fetch_offer(slug)?;

    let extractor = OfferExtractor::new(&stations, &travel_times, summaries.as_ref());
    let offer = extractor.extract(&ad)?;

    if offers::offer_exists(db, &offer.id)? {
        println!("Offer {} already recorded, skipping append", offer.id);
        return Ok(());
    }

    info!(
        "Offer {} is {:.2} km from {} ({})",
        offer.id,
        offer.distance_km,
        offer.closest_station,
        offer.status_marker()
    );

    offers::append_offer(db, &offer)?;
    println!("Successfully processed offer: {slug}");

    Ok(())
}
