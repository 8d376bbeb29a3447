use geo::Point;
use serde::{Deserialize, Serialize};

/// the best geocoder candidate for an address.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GeocodeMatch {
    pub lat: f64,
    pub lon: f64,
    /// the address as standardized by the geocoder
    pub matched_address: String,
    /// match confidence from 0 to 100, when reported
    pub score: Option<f64>,
}

impl GeocodeMatch {
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}
