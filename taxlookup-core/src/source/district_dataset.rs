use crate::model::{district::District, Crs};

/// districts read from a [`super::DistrictSource`], reprojected to WGS84.
#[derive(Clone, Debug)]
pub struct DistrictDataset {
    pub districts: Vec<District>,
    /// CRS the source was published in, before reprojection
    pub source_crs: Crs,
    /// file the districts were read from
    pub source: String,
}
