#[derive(thiserror::Error, Debug)]
pub enum GeocodeError {
    #[error("address is empty")]
    EmptyAddress,
    #[error("failed building geocoder HTTP client: {0}")]
    ClientError(String),
    #[error("geocoding request failed: {0}")]
    RequestError(String),
    #[error("geocoder responded with HTTP status {0}")]
    ResponseStatus(u16),
    #[error("geocoder returned error {code}: {message}")]
    ServiceError { code: i64, message: String },
    #[error("failed decoding geocoder response: {0}")]
    DecodeError(String),
}
