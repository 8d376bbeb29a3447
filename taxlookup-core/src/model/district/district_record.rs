use serde::{Deserialize, Serialize};

/// attributes of a tax district row. any attribute may be missing from
/// the source dataset; unincorporated areas have no city.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DistrictRecord {
    pub jurisdiction: Option<String>,
    pub county: Option<String>,
    pub city: Option<String>,
    pub rate: Option<f64>,
    pub effective_date: Option<String>,
}
