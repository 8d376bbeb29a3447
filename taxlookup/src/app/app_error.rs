use taxlookup_core::{geocode::GeocodeError, source::DatasetError};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failure loading tax districts: {source}")]
    DatasetError {
        #[from]
        source: DatasetError,
    },
    #[error("failure building geocoder: {source}")]
    GeocodeError {
        #[from]
        source: GeocodeError,
    },
    #[error("server failure: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure encoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
    #[error("failure rendering page template: {source}")]
    TemplateError {
        #[from]
        source: tera::Error,
    },
    #[error("background task failed: {0}")]
    TaskError(String),
}
