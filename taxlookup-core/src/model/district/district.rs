use super::DistrictRecord;
use geo::MultiPolygon;

/// a single CDTFA tax district polygon with its attributes, in WGS84.
#[derive(Clone, Debug)]
pub struct District {
    pub geometry: MultiPolygon<f64>,
    pub record: DistrictRecord,
}

impl District {
    pub fn new(geometry: MultiPolygon<f64>, record: DistrictRecord) -> District {
        District { geometry, record }
    }
}
