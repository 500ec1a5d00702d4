// index.rs
use crate::geo::stations::{warsaw_metro_stations, Station};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two WGS84 points
/// (Haversine formula).
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Read-only nearest-station lookup over a fixed set of stations.
/// Built once at startup and passed to whoever needs it.
pub struct StationIndex {
    stations: Vec<Station>,
}

impl StationIndex {
    /// Panics if `stations` is empty. An empty index is a configuration
    /// error and every caller relies on a nearest station existing.
    pub fn new(stations: Vec<Station>) -> Self {
        assert!(!stations.is_empty(), "station index must not be empty");
        Self { stations }
    }

    pub fn warsaw() -> Self {
        Self::new(warsaw_metro_stations())
    }

    /// The station closest to the query point, with its distance in
    /// kilometers. Linear scan; on an exact tie the first station in
    /// table order wins.
    pub fn nearest(&self, latitude: f64, longitude: f64) -> (&Station, f64) {
        let mut closest = &self.stations[0];
        let mut min_distance = haversine_km(
            latitude,
            longitude,
            closest.latitude,
            closest.longitude,
        );

        for station in &self.stations[1..] {
            let distance = haversine_km(latitude, longitude, station.latitude, station.longitude);
            if distance < min_distance {
                min_distance = distance;
                closest = station;
            }
        }

        (closest, min_distance)
    }
}
