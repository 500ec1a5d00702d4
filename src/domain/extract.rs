// src/domain/extract.rs
use crate::domain::NormalizedOffer;
use crate::enrich::{OfferSummary, SummaryProvider, TravelMode, TravelTimeProvider, NOT_AVAILABLE};
use crate::geo::StationIndex;
use crate::scraper::models::Ad;
use log::{debug, warn};
use std::fmt;

pub const PROXIMITY_THRESHOLD_KM: f64 = 1.0;

/// An offer qualifies for enrichment when it sits within walking
/// distance of a station. The boundary itself qualifies.
pub fn meets_proximity_threshold(distance_km: f64) -> bool {
    distance_km <= PROXIMITY_THRESHOLD_KM
}

#[derive(Debug)]
pub enum ExtractionError {
    /// Every required field absent from the payload, by path.
    MissingFields(Vec<String>),
    InvalidField { field: &'static str, value: String },
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionError::MissingFields(names) => {
                write!(f, "required fields missing: {}", names.join(", "))
            }
            ExtractionError::InvalidField { field, value } => {
                write!(f, "field {field} has unusable value '{value}'")
            }
        }
    }
}

impl std::error::Error for ExtractionError {}

/// Maps one raw portal payload to a `NormalizedOffer`. Consults the
/// station index for proximity and calls the enrichment providers only
/// for offers inside the threshold; provider failures degrade the
/// affected fields to the sentinel and never abort the base record.
pub struct OfferExtractor<'a> {
    stations: &'a StationIndex,
    travel_times: &'a dyn TravelTimeProvider,
    summaries: &'a dyn SummaryProvider,
}

struct RequiredFields<'ad> {
    id: i64,
    slug: &'ad str,
    url: &'ad str,
    latitude: f64,
    longitude: f64,
    base_cost: f64,
    rent: f64,
}

impl<'a> OfferExtractor<'a> {
    pub fn new(
        stations: &'a StationIndex,
        travel_times: &'a dyn TravelTimeProvider,
        summaries: &'a dyn SummaryProvider,
    ) -> Self {
        Self {
            stations,
            travel_times,
            summaries,
        }
    }

    pub fn extract(&self, ad: &Ad) -> Result<NormalizedOffer, ExtractionError> {
        let required = required_fields(ad)?;

        let (station, distance_km) = self.stations.nearest(required.latitude, required.longitude);
        let meets = meets_proximity_threshold(distance_km);

        let mut walking_time = NOT_AVAILABLE.to_string();
        let mut transit_time = NOT_AVAILABLE.to_string();
        let mut summary = OfferSummary::not_available();

        if meets {
            let origin = (station.latitude, station.longitude);
            let destination = (required.latitude, required.longitude);

            walking_time = self.lookup_travel_time(origin, destination, TravelMode::Walking);
            transit_time = self.lookup_travel_time(origin, destination, TravelMode::Transit);

            let description = compose_description(ad, station.name, &walking_time, &transit_time);
            summary = match self.summaries.summarize(&description) {
                Ok(summary) => summary,
                Err(e) => {
                    // Uniform sentinel for all three fields, no partials.
                    warn!("⚠️ Summary lookup failed: {e}");
                    OfferSummary::not_available()
                }
            };
        } else {
            debug!(
                "Offer {} is {distance_km:.2} km from {}, skipping enrichment",
                required.id, station.name
            );
        }

        Ok(NormalizedOffer {
            id: required.id.to_string(),
            slug: required.slug.to_string(),
            address: full_address(ad),
            latitude: required.latitude,
            longitude: required.longitude,
            base_cost: required.base_cost,
            rent: required.rent,
            total_cost: required.base_cost + required.rent,
            area: area(ad),
            closest_station: station.name.to_string(),
            distance_km,
            meets_proximity_threshold: meets,
            walking_time,
            transit_time,
            available_from: summary.available_from,
            total_monthly_cost: summary.total_monthly_cost,
            key_advantages: summary.key_advantages,
            url: required.url.to_string(),
        })
    }

    fn lookup_travel_time(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        mode: TravelMode,
    ) -> String {
        match self.travel_times.travel_time(origin, destination, mode) {
            Ok(duration) => duration,
            Err(e) => {
                warn!("⚠️ {} time lookup failed: {e}", mode.as_str());
                NOT_AVAILABLE.to_string()
            }
        }
    }
}

fn required_fields(ad: &Ad) -> Result<RequiredFields<'_>, ExtractionError> {
    let mut missing: Vec<&str> = Vec::new();

    let id = ad.id;
    if id.is_none() {
        missing.push("id");
    }
    let slug = ad.slug.as_deref();
    if slug.is_none() {
        missing.push("slug");
    }
    let url = ad.url.as_deref();
    if url.is_none() {
        missing.push("url");
    }

    let coordinates = ad.location.as_ref().and_then(|l| l.coordinates.as_ref());
    let latitude = coordinates.and_then(|c| c.latitude);
    if latitude.is_none() {
        missing.push("location.coordinates.latitude");
    }
    let longitude = coordinates.and_then(|c| c.longitude);
    if longitude.is_none() {
        missing.push("location.coordinates.longitude");
    }

    let price = characteristic_value(ad, "price");
    if price.is_none() {
        missing.push("characteristics.price");
    }
    let rent = characteristic_value(ad, "rent");
    if rent.is_none() {
        missing.push("characteristics.rent");
    }

    match (id, slug, url, latitude, longitude, price, rent) {
        (Some(id), Some(slug), Some(url), Some(latitude), Some(longitude), Some(price), Some(rent)) => {
            Ok(RequiredFields {
                id,
                slug,
                url,
                latitude,
                longitude,
                base_cost: parse_cost("characteristics.price", price)?,
                rent: parse_cost("characteristics.rent", rent)?,
            })
        }
        _ => Err(ExtractionError::MissingFields(
            missing.iter().map(|name| name.to_string()).collect(),
        )),
    }
}

fn parse_cost(field: &'static str, raw: &str) -> Result<f64, ExtractionError> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ExtractionError::InvalidField {
            field,
            value: raw.to_string(),
        })
}

fn characteristic_value<'ad>(ad: &'ad Ad, key: &str) -> Option<&'ad str> {
    ad.characteristics
        .as_ref()?
        .iter()
        .find(|c| c.key.as_deref() == Some(key))?
        .value
        .as_deref()
}

fn area(ad: &Ad) -> String {
    ad.characteristics
        .as_ref()
        .and_then(|chars| chars.iter().find(|c| c.key.as_deref() == Some("m")))
        .and_then(|c| c.localized_value.as_deref().or(c.value.as_deref()))
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Street, district, city; whichever parts the payload carries.
fn full_address(ad: &Ad) -> String {
    let address = ad.location.as_ref().and_then(|l| l.address.as_ref());

    let mut parts: Vec<&str> = Vec::new();
    if let Some(address) = address {
        for part in [&address.street, &address.district, &address.city] {
            if let Some(name) = part.as_ref().and_then(|p| p.name.as_deref()) {
                if !name.is_empty() {
                    parts.push(name);
                }
            }
        }
    }

    parts.join(", ")
}

/// Everything the summarizer should see about an offer, as one text
/// block. Price, rent and area are left out; they land in their own
/// sink columns.
fn compose_description(ad: &Ad, station_name: &str, walking_time: &str, transit_time: &str) -> String {
    let mut parts = Vec::new();

    if let Some(title) = ad.title.as_deref() {
        parts.push(format!("Title: {title}"));
    }
    let address = full_address(ad);
    if !address.is_empty() {
        parts.push(format!("Address: {address}"));
    }
    parts.push(format!("Closest Metro: {station_name}"));
    parts.push(format!("Walking time from metro: {walking_time}"));
    parts.push(format!("Transit time from metro: {transit_time}"));

    if let Some(characteristics) = ad.characteristics.as_ref() {
        parts.push("\nProperty Details:".to_string());
        for c in characteristics {
            if matches!(c.key.as_deref(), Some("price") | Some("rent") | Some("m")) {
                continue;
            }
            let value = c.localized_value.as_deref().or(c.value.as_deref());
            if let (Some(label), Some(value)) = (c.label.as_deref(), value) {
                parts.push(format!("- {label}: {value}"));
            }
        }
    }

    if let Some(features) = ad.features.as_ref() {
        if !features.is_empty() {
            parts.push("\nFeatures:".to_string());
            for feature in features {
                parts.push(format!("- {feature}"));
            }
        }
    }

    parts.push("\nAdditional Information:".to_string());
    if let Some(advertiser_type) = ad.advertiser_type.as_deref() {
        parts.push(format!("- Advertiser Type: {advertiser_type}"));
    }
    if let Some(created_at) = ad.created_at.as_deref() {
        parts.push(format!("- Created: {created_at}"));
    }
    if let Some(modified_at) = ad.modified_at.as_deref() {
        parts.push(format!("- Modified: {modified_at}"));
    }

    if let Some(description) = ad.description.as_deref() {
        parts.push("\nDescription:".to_string());
        parts.push(description.to_string());
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::EnrichmentError;
    use crate::geo::Station;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    struct FakeTravelTimes {
        calls: Cell<u32>,
        // None answers with Err, simulating a provider outage.
        walking: Option<String>,
        transit: Option<String>,
    }

    impl FakeTravelTimes {
        fn answering(walking: Option<&str>, transit: Option<&str>) -> Self {
            Self {
                calls: Cell::new(0),
                walking: walking.map(String::from),
                transit: transit.map(String::from),
            }
        }
    }

    impl TravelTimeProvider for FakeTravelTimes {
        fn travel_time(
            &self,
            _origin: (f64, f64),
            _destination: (f64, f64),
            mode: TravelMode,
        ) -> Result<String, EnrichmentError> {
            self.calls.set(self.calls.get() + 1);
            let answer = match mode {
                TravelMode::Walking => &self.walking,
                TravelMode::Transit => &self.transit,
            };
            answer
                .clone()
                .ok_or_else(|| EnrichmentError::Api("matrix down".to_string()))
        }
    }

    struct FakeSummaries {
        calls: Cell<u32>,
        seen_description: RefCell<Option<String>>,
        result: Option<OfferSummary>,
    }

    impl FakeSummaries {
        fn answering(result: Option<OfferSummary>) -> Self {
            Self {
                calls: Cell::new(0),
                seen_description: RefCell::new(None),
                result,
            }
        }
    }

    impl SummaryProvider for FakeSummaries {
        fn summarize(&self, description: &str) -> Result<OfferSummary, EnrichmentError> {
            self.calls.set(self.calls.get() + 1);
            *self.seen_description.borrow_mut() = Some(description.to_string());
            self.result
                .clone()
                .ok_or_else(|| EnrichmentError::Api("model down".to_string()))
        }
    }

    fn sample_summary() -> OfferSummary {
        serde_json::from_value(json!({
            "available_from": "Immediately",
            "total_monthly_cost": "3500 PLN",
            "key_advantages": "Balcony, Parking"
        }))
        .unwrap()
    }

    /// Centrum only, so distances are fully under test control.
    fn centrum_index() -> StationIndex {
        StationIndex::new(vec![Station {
            name: "Centrum",
            latitude: 52.2298,
            longitude: 21.0118,
        }])
    }

    fn sample_ad(latitude: f64, longitude: f64, base_cost: &str, rent: &str) -> Ad {
        serde_json::from_value(json!({
            "id": 987654,
            "slug": "przytulne-2-pokoje-przy-metrze",
            "url": "https://www.otodom.pl/pl/oferta/przytulne-2-pokoje-przy-metrze",
            "title": "Przytulne 2 pokoje przy metrze",
            "description": "<p>Mieszkanie po remoncie, od zaraz.</p>",
            "advertiserType": "agency",
            "createdAt": "2025-05-10T09:30:00+02:00",
            "modifiedAt": "2025-05-11T10:00:00+02:00",
            "location": {
                "coordinates": {"latitude": latitude, "longitude": longitude},
                "address": {
                    "street": {"name": "Marszałkowska"},
                    "district": {"name": "Śródmieście"},
                    "city": {"name": "Warszawa"}
                }
            },
            "characteristics": [
                {"key": "price", "value": base_cost, "label": "Cena", "localizedValue": format!("{base_cost} zł")},
                {"key": "rent", "value": rent, "label": "Czynsz", "localizedValue": format!("{rent} zł")},
                {"key": "m", "value": "48", "label": "Powierzchnia", "localizedValue": "48 m²"},
                {"key": "rooms_num", "value": "2", "label": "Liczba pokoi", "localizedValue": "2"}
            ],
            "features": ["balkon", "winda"]
        }))
        .unwrap()
    }

    // Roughly 0.5 km south of Centrum.
    const NEAR: (f64, f64) = (52.22525, 21.0118);
    // Deep Praga, several km from Centrum.
    const FAR: (f64, f64) = (52.2298, 21.1500);

    #[test]
    fn total_cost_is_base_plus_rent() {
        let index = centrum_index();
        let travel = FakeTravelTimes::answering(Some("6 mins"), Some("4 mins"));
        let summaries = FakeSummaries::answering(Some(sample_summary()));
        let extractor = OfferExtractor::new(&index, &travel, &summaries);

        let offer = extractor.extract(&sample_ad(NEAR.0, NEAR.1, "3000", "500")).unwrap();

        assert_eq!(offer.base_cost, 3000.0);
        assert_eq!(offer.rent, 500.0);
        assert_eq!(offer.total_cost, 3500.0);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        assert!(meets_proximity_threshold(0.0));
        assert!(meets_proximity_threshold(1.0));
        assert!(!meets_proximity_threshold(1.0001));
    }

    #[test]
    fn near_offer_is_enriched_and_green() {
        let index = centrum_index();
        let travel = FakeTravelTimes::answering(Some("6 mins"), Some("4 mins"));
        let summaries = FakeSummaries::answering(Some(sample_summary()));
        let extractor = OfferExtractor::new(&index, &travel, &summaries);

        let offer = extractor.extract(&sample_ad(NEAR.0, NEAR.1, "3000", "500")).unwrap();

        assert!(offer.meets_proximity_threshold);
        assert!(offer.distance_km > 0.3 && offer.distance_km < 0.7);
        assert_eq!(offer.closest_station, "Centrum");
        assert_eq!(offer.status_marker(), "GREEN");
        assert_eq!(offer.walking_time, "6 mins");
        assert_eq!(offer.transit_time, "4 mins");
        assert_eq!(offer.available_from, "Immediately");
        assert_eq!(travel.calls.get(), 2);
        assert_eq!(summaries.calls.get(), 1);
    }

    #[test]
    fn far_offer_skips_providers_entirely() {
        let index = centrum_index();
        let travel = FakeTravelTimes::answering(Some("6 mins"), Some("4 mins"));
        let summaries = FakeSummaries::answering(Some(sample_summary()));
        let extractor = OfferExtractor::new(&index, &travel, &summaries);

        let offer = extractor.extract(&sample_ad(FAR.0, FAR.1, "3000", "500")).unwrap();

        assert!(!offer.meets_proximity_threshold);
        assert_eq!(offer.status_marker(), "RED");
        assert_eq!(offer.walking_time, "N/A");
        assert_eq!(offer.transit_time, "N/A");
        assert_eq!(offer.available_from, "N/A");
        assert_eq!(offer.total_monthly_cost, "N/A");
        assert_eq!(offer.key_advantages, "N/A");
        assert_eq!(travel.calls.get(), 0);
        assert_eq!(summaries.calls.get(), 0);
    }

    #[test]
    fn transit_failure_leaves_walking_intact() {
        let index = centrum_index();
        let travel = FakeTravelTimes::answering(Some("12 mins"), None);
        let summaries = FakeSummaries::answering(Some(sample_summary()));
        let extractor = OfferExtractor::new(&index, &travel, &summaries);

        let offer = extractor.extract(&sample_ad(NEAR.0, NEAR.1, "3000", "500")).unwrap();

        assert_eq!(offer.walking_time, "12 mins");
        assert_eq!(offer.transit_time, "N/A");
    }

    #[test]
    fn no_route_sentinel_passes_through() {
        let index = centrum_index();
        let travel = FakeTravelTimes::answering(Some("12 mins"), Some("N/A"));
        let summaries = FakeSummaries::answering(Some(sample_summary()));
        let extractor = OfferExtractor::new(&index, &travel, &summaries);

        let offer = extractor.extract(&sample_ad(NEAR.0, NEAR.1, "3000", "500")).unwrap();

        assert_eq!(offer.walking_time, "12 mins");
        assert_eq!(offer.transit_time, "N/A");
    }

    #[test]
    fn summary_failure_degrades_all_three_fields() {
        let index = centrum_index();
        let travel = FakeTravelTimes::answering(Some("6 mins"), Some("4 mins"));
        let summaries = FakeSummaries::answering(None);
        let extractor = OfferExtractor::new(&index, &travel, &summaries);

        let offer = extractor.extract(&sample_ad(NEAR.0, NEAR.1, "3000", "500")).unwrap();

        // Base record survives, summary triple degrades uniformly.
        assert_eq!(offer.total_cost, 3500.0);
        assert_eq!(offer.walking_time, "6 mins");
        assert_eq!(offer.available_from, "N/A");
        assert_eq!(offer.total_monthly_cost, "N/A");
        assert_eq!(offer.key_advantages, "N/A");
    }

    #[test]
    fn summarizer_sees_composed_description() {
        let index = centrum_index();
        let travel = FakeTravelTimes::answering(Some("6 mins"), Some("4 mins"));
        let summaries = FakeSummaries::answering(Some(sample_summary()));
        let extractor = OfferExtractor::new(&index, &travel, &summaries);

        extractor.extract(&sample_ad(NEAR.0, NEAR.1, "3000", "500")).unwrap();

        let seen = summaries.seen_description.borrow();
        let description = seen.as_deref().unwrap();
        assert!(description.contains("Title: Przytulne 2 pokoje przy metrze"));
        assert!(description.contains("Closest Metro: Centrum"));
        assert!(description.contains("Walking time from metro: 6 mins"));
        assert!(description.contains("- Liczba pokoi: 2"));
        // Costs get their own sink columns and stay out of the prompt.
        assert!(!description.contains("Cena"));
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let ad: Ad = serde_json::from_value(json!({
            "slug": "incomplete-offer",
            "location": {"coordinates": {"longitude": 21.0}},
            "characteristics": [
                {"key": "rent", "value": "500", "label": "Czynsz", "localizedValue": "500 zł"}
            ]
        }))
        .unwrap();

        let index = centrum_index();
        let travel = FakeTravelTimes::answering(Some("6 mins"), Some("4 mins"));
        let summaries = FakeSummaries::answering(Some(sample_summary()));
        let extractor = OfferExtractor::new(&index, &travel, &summaries);

        match extractor.extract(&ad) {
            Err(ExtractionError::MissingFields(names)) => {
                assert!(names.contains(&"id".to_string()));
                assert!(names.contains(&"url".to_string()));
                assert!(names.contains(&"location.coordinates.latitude".to_string()));
                assert!(names.contains(&"characteristics.price".to_string()));
                assert!(!names.contains(&"slug".to_string()));
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_cost_is_invalid_field() {
        let index = centrum_index();
        let travel = FakeTravelTimes::answering(Some("6 mins"), Some("4 mins"));
        let summaries = FakeSummaries::answering(Some(sample_summary()));
        let extractor = OfferExtractor::new(&index, &travel, &summaries);

        let ad = sample_ad(NEAR.0, NEAR.1, "ask agent", "500");
        match extractor.extract(&ad) {
            Err(ExtractionError::InvalidField { field, .. }) => {
                assert_eq!(field, "characteristics.price");
            }
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn address_joins_present_parts_only() {
        let ad: Ad = serde_json::from_value(json!({
            "id": 1,
            "slug": "no-street",
            "url": "https://www.otodom.pl/pl/oferta/no-street",
            "location": {
                "coordinates": {"latitude": FAR.0, "longitude": FAR.1},
                "address": {
                    "street": null,
                    "district": {"name": "Praga-Północ"},
                    "city": {"name": "Warszawa"}
                }
            },
            "characteristics": [
                {"key": "price", "value": "3200", "label": "Cena", "localizedValue": "3 200 zł"},
                {"key": "rent", "value": "400", "label": "Czynsz", "localizedValue": "400 zł"}
            ]
        }))
        .unwrap();

        let index = centrum_index();
        let travel = FakeTravelTimes::answering(Some("6 mins"), Some("4 mins"));
        let summaries = FakeSummaries::answering(Some(sample_summary()));
        let extractor = OfferExtractor::new(&index, &travel, &summaries);

        let offer = extractor.extract(&ad).unwrap();
        assert_eq!(offer.address, "Praga-Północ, Warszawa");
        // Area characteristic is absent here; sentinel takes its place.
        assert_eq!(offer.area, "N/A");
    }
}
