use super::DistrictRecord;
use serde::{Deserialize, Serialize};

/// maps [`DistrictRecord`] attributes to the field names of a source dataset.
///
/// each attribute lists candidate field names in priority order. a candidate
/// is tried as written, then upper-cased, then lower-cased, and the first
/// non-empty value wins. CDTFA releases have spelled the city column as
/// `City_name`, `CITY_NAME` and `City_Name_`, so all of them are defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FieldMapping {
    pub jurisdiction: Vec<String>,
    pub county: Vec<String>,
    pub city: Vec<String>,
    pub rate: Vec<String>,
    pub effective_date: Vec<String>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            jurisdiction: names(&["JURIS_NAME"]),
            county: names(&["COUNTY_NAM", "County_nam"]),
            city: names(&["CITY_NAME", "City_name", "City_Name_"]),
            rate: names(&["RATE"]),
            effective_date: names(&["START_DATE"]),
        }
    }
}

impl FieldMapping {
    /// builds a record by resolving each attribute through `lookup`, which
    /// returns the raw value of a source field by name.
    pub fn record<F>(&self, lookup: F) -> DistrictRecord
    where
        F: Fn(&str) -> Option<String>,
    {
        DistrictRecord {
            jurisdiction: first_value(&self.jurisdiction, &lookup),
            county: first_value(&self.county, &lookup),
            city: first_value(&self.city, &lookup),
            rate: first_value(&self.rate, &lookup).and_then(|r| parse_rate(&r)),
            effective_date: first_value(&self.effective_date, &lookup),
        }
    }
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| String::from(*s)).collect()
}

fn first_value<F>(candidates: &[String], lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    candidates
        .iter()
        .flat_map(|name| [name.clone(), name.to_uppercase(), name.to_lowercase()])
        .find_map(|name| {
            lookup(&name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
}

/// rates are published either as a number or with a trailing percent sign.
fn parse_rate(value: &str) -> Option<f64> {
    value.trim_end_matches('%').trim().parse::<f64>().ok()
}
