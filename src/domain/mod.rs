mod extract;
mod offer;

pub use extract::{
    meets_proximity_threshold, ExtractionError, OfferExtractor, PROXIMITY_THRESHOLD_KM,
};
pub use offer::{NormalizedOffer, OfferRow};
