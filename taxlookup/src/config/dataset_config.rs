use serde::{Deserialize, Serialize};
use taxlookup_core::{
    model::{district::FieldMapping, Crs},
    source::{DatasetError, DistrictSource},
    validate::Validator,
};

/// where the tax district polygons come from and how to read them
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    /// path to a .shp, .csv or .geojson file
    pub file: String,
    /// WKT column of a CSV dataset
    pub geometry_column: String,
    /// CRS used when the dataset does not declare one
    pub assumed_crs: Crs,
    /// search radius in degrees for lookups that hit no polygon
    pub tolerance_deg: f64,
    pub fields: FieldMapping,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            file: String::from("CDTFA_SalesandUseTaxRates.shp"),
            geometry_column: String::from(DistrictSource::DEFAULT_GEOMETRY_COLUMN),
            assumed_crs: Crs::WebMercator,
            tolerance_deg: Validator::DEFAULT_TOLERANCE,
            fields: FieldMapping::default(),
        }
    }
}

impl DatasetConfig {
    pub fn source(&self) -> Result<DistrictSource, DatasetError> {
        DistrictSource::from_path(&self.file, &self.geometry_column)
    }
}
