use crate::model::district::DistrictRecord;
use serde::{Deserialize, Serialize};

/// every tax district at (or near) a geocoded address.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    Found {
        matched_address: String,
        latitude: f64,
        longitude: f64,
        districts: Vec<DistrictRecord>,
    },
    /// the address geocoded but no district polygon is near it
    NotFound {
        matched_address: String,
        latitude: f64,
        longitude: f64,
    },
    Error {
        message: String,
    },
}

impl LookupOutcome {
    pub fn error(message: &str) -> Self {
        LookupOutcome::Error {
            message: message.to_string(),
        }
    }
}
