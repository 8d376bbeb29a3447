mod csv_ops;
mod dataset_error;
mod district_dataset;
mod district_source;
mod geojson_ops;
mod shapefile_ops;

pub use dataset_error::DatasetError;
pub use district_dataset::DistrictDataset;
pub use district_source::DistrictSource;
