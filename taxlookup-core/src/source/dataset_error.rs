#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("failed reading '{filepath}': {error}")]
    ReadError { filepath: String, error: String },
    #[error("'{filepath}' is missing column '{column}'")]
    MissingColumn { filepath: String, column: String },
    #[error("row {row} of '{filepath}' has unusable geometry: {message}")]
    GeometryError {
        filepath: String,
        row: usize,
        message: String,
    },
    #[error("unsupported dataset file type: '{0}', expected .shp, .csv, .geojson or .json")]
    UnsupportedFileType(String),
    #[error("'{filepath}' declares coordinate reference system '{declared}', expected WGS84 or Web Mercator")]
    UnsupportedCrs { filepath: String, declared: String },
    #[error("dataset '{0}' contains no districts")]
    Empty(String),
}
