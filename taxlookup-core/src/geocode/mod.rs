mod arcgis_geocoder;
mod geocode_error;
mod geocode_match;
mod geocoder;

pub use arcgis_geocoder::ArcGisGeocoder;
pub use geocode_error::GeocodeError;
pub use geocode_match::GeocodeMatch;
pub use geocoder::Geocoder;
