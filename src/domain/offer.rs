// src/domain/offer.rs

/// Fully normalized view of one rental offer, ready for the sink.
/// Constructed once by the extractor and never mutated.
#[derive(Debug, Clone)]
pub struct NormalizedOffer {
    pub id: String,
    pub slug: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub base_cost: f64,
    pub rent: f64,
    pub total_cost: f64,
    pub area: String,
    pub closest_station: String,
    pub distance_km: f64,
    pub meets_proximity_threshold: bool,
    pub walking_time: String,
    pub transit_time: String,
    pub available_from: String,
    pub total_monthly_cost: String,
    pub key_advantages: String,
    pub url: String,
}

impl NormalizedOffer {
    /// Two-valued marker the sink renders in its first column: GREEN for
    /// offers within walking distance of a station, RED otherwise.
    pub fn status_marker(&self) -> &'static str {
        if self.meets_proximity_threshold {
            "GREEN"
        } else {
            "RED"
        }
    }
}

/// A stored sink row in spreadsheet column order. This is the shape the
/// export renders; the store keeps a few extra columns (coordinates,
/// distance, append timestamp) that reviewers do not see.
#[derive(Debug)]
pub struct OfferRow {
    pub status: String,
    pub closest_station: String,
    pub base_cost: f64,
    pub total_cost: f64,
    pub url: String,
    pub area: String,
    pub address: String,
    pub walking_time: String,
    pub transit_time: String,
    pub rent: f64,
    pub offer_id: String,
    pub slug: String,
    pub available_from: String,
    pub total_monthly_cost: String,
    pub key_advantages: String,
}
