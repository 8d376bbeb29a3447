use super::{GeocodeError, GeocodeMatch};
use async_trait::async_trait;

/// resolves a free-form address to a location.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// returns the best match for the address, or `None` when the geocoder
    /// has no candidates for it.
    async fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>, GeocodeError>;
}
