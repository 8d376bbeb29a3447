use crate::model::{district::DistrictRecord, Crs};
use serde::Serialize;

/// describes a loaded district dataset, used for diagnostics.
#[derive(Serialize, Clone, Debug)]
pub struct IndexSummary {
    pub source: String,
    pub source_crs: Crs,
    pub districts: usize,
    pub polygons: usize,
    /// [min lon, min lat, max lon, max lat]
    pub bounds: [f64; 4],
    /// attributes resolved on the first row, to confirm the field mapping
    pub first_record: Option<DistrictRecord>,
}
