use serde::{Deserialize, Serialize};
use std::time::Duration;
use taxlookup_core::geocode::{ArcGisGeocoder, GeocodeError};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GeocoderConfig {
    /// ArcGIS `findAddressCandidates` endpoint
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: String::from(ArcGisGeocoder::DEFAULT_URL),
            timeout_secs: ArcGisGeocoder::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl GeocoderConfig {
    pub fn build(&self) -> Result<ArcGisGeocoder, GeocodeError> {
        ArcGisGeocoder::new(&self.url, Duration::from_secs(self.timeout_secs))
    }
}
