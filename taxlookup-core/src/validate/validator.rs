use super::{LookupOutcome, ValidationOutcome};
use crate::{
    geocode::{GeocodeError, Geocoder},
    index::DistrictIndex,
    model::jurisdiction::jurisdiction_ops,
};
use std::sync::Arc;

/// answers validation and lookup requests against a loaded district index.
pub struct Validator {
    geocoder: Arc<dyn Geocoder>,
    index: Arc<DistrictIndex>,
    /// search radius in degrees used by lookups when no district contains
    /// the geocoded point
    tolerance: f64,
}

impl Validator {
    pub const DEFAULT_TOLERANCE: f64 = 0.0005;

    pub fn new(geocoder: Arc<dyn Geocoder>, index: Arc<DistrictIndex>, tolerance: f64) -> Self {
        Validator {
            geocoder,
            index,
            tolerance,
        }
    }

    pub fn index(&self) -> &DistrictIndex {
        &self.index
    }

    /// checks whether `address` lies inside the claimed jurisdiction. every
    /// failure is reported as [`ValidationOutcome::Error`].
    pub async fn validate(&self, address: &str, claim: &str) -> ValidationOutcome {
        let geocoded = match self.geocoder.geocode(address).await {
            Ok(Some(m)) => m,
            Ok(None) => return ValidationOutcome::error(ValidationOutcome::ERR_NOT_GEOCODED),
            Err(e) => return geocode_failure(e, ValidationOutcome::error),
        };
        let Some(district) = self.index.containing(&geocoded.point()) else {
            log::info!(
                "no district contains ({}, {})",
                geocoded.lon,
                geocoded.lat
            );
            return ValidationOutcome::error(ValidationOutcome::ERR_OUTSIDE_DATASET);
        };
        let comparison = jurisdiction_ops::compare(
            claim,
            district.record.city.as_deref(),
            district.record.county.as_deref(),
        );
        log::debug!(
            "claim '{claim}' vs district {:?}: matched={}",
            district.record.jurisdiction,
            comparison.matched
        );
        ValidationOutcome::from_comparison(claim, comparison, geocoded.matched_address)
    }

    /// finds every district at the address, falling back to districts
    /// within the search tolerance.
    pub async fn lookup(&self, address: &str) -> LookupOutcome {
        let geocoded = match self.geocoder.geocode(address).await {
            Ok(Some(m)) => m,
            Ok(None) => return LookupOutcome::error(ValidationOutcome::ERR_NOT_GEOCODED),
            Err(e) => return geocode_failure(e, LookupOutcome::error),
        };
        let districts = self
            .index
            .near(&geocoded.point(), self.tolerance)
            .into_iter()
            .map(|d| d.record.clone())
            .collect::<Vec<_>>();
        if districts.is_empty() {
            LookupOutcome::NotFound {
                matched_address: geocoded.matched_address,
                latitude: geocoded.lat,
                longitude: geocoded.lon,
            }
        } else {
            LookupOutcome::Found {
                matched_address: geocoded.matched_address,
                latitude: geocoded.lat,
                longitude: geocoded.lon,
                districts,
            }
        }
    }
}

/// logs the failure without the address, which is customer data.
fn geocode_failure<T>(error: GeocodeError, into: fn(&str) -> T) -> T {
    log::warn!("geocoding failed: {error}");
    into(&error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geocode::GeocodeMatch,
        model::{
            district::{District, DistrictRecord},
            Crs,
        },
        source::DistrictDataset,
    };
    use async_trait::async_trait;
    use geo::{MultiPolygon, Rect};
    use std::collections::HashMap;

    /// geocodes from a fixed table, failing for addresses starting with "ERROR"
    struct StubGeocoder(HashMap<&'static str, (f64, f64)>);

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>, GeocodeError> {
            if address.starts_with("ERROR") {
                return Err(GeocodeError::ResponseStatus(503));
            }
            Ok(self.0.get(address).map(|(lon, lat)| GeocodeMatch {
                lat: *lat,
                lon: *lon,
                matched_address: address.to_uppercase(),
                score: Some(100.0),
            }))
        }
    }

    fn district(name: &str, city: Option<&str>, min: (f64, f64), max: (f64, f64)) -> District {
        District::new(
            MultiPolygon::new(vec![Rect::new(min, max).to_polygon()]),
            DistrictRecord {
                jurisdiction: Some(name.to_string()),
                county: Some(String::from("Sacramento")),
                city: city.map(String::from),
                rate: Some(8.75),
                effective_date: Some(String::from("2024-04-01")),
            },
        )
    }

    fn validator() -> Validator {
        let dataset = DistrictDataset {
            districts: vec![
                district("SACRAMENTO", Some("Sacramento"), (-121.6, 38.4), (-121.3, 38.7)),
                district("UNINCORPORATED", None, (-121.3, 38.4), (-121.0, 38.7)),
            ],
            source_crs: Crs::Wgs84,
            source: String::from("test"),
        };
        let index = DistrictIndex::new(dataset).expect("test invariant failed");
        let geocoder = StubGeocoder(HashMap::from([
            ("downtown", (-121.49, 38.58)),
            ("rancho", (-121.2, 38.6)),
            ("edge", (-121.3, 38.5)),
            ("los angeles", (-118.24, 34.05)),
            ("77 Privacy Way, Los Angeles", (-118.24, 34.05)),
        ]));
        Validator::new(
            Arc::new(geocoder),
            Arc::new(index),
            Validator::DEFAULT_TOLERANCE,
        )
    }

    #[tokio::test]
    async fn test_accepted_city_claim() {
        let result = validator().validate("downtown", "City of Sacramento").await;
        assert_eq!(
            result,
            ValidationOutcome::Accepted {
                claimed_jurisdiction: String::from("City of Sacramento"),
                actual_jurisdiction: String::from("Sacramento"),
                matched_address: String::from("DOWNTOWN"),
            }
        );
    }

    #[tokio::test]
    async fn test_denied_city_claim_in_unincorporated_area() {
        let result = validator().validate("rancho", "Sacramento, City of").await;
        assert_eq!(
            result,
            ValidationOutcome::Denied {
                claimed_jurisdiction: String::from("Sacramento, City of"),
                actual_jurisdiction: String::from("Sacramento"),
                matched_address: String::from("RANCHO"),
            }
        );
    }

    #[tokio::test]
    async fn test_accepted_county_claim_in_unincorporated_area() {
        let result = validator().validate("rancho", "Sacramento County").await;
        assert!(matches!(result, ValidationOutcome::Accepted { .. }));
    }

    #[tokio::test]
    async fn test_error_outcomes() {
        let v = validator();
        assert_eq!(
            v.validate("nowhere", "City of Sacramento").await,
            ValidationOutcome::error(ValidationOutcome::ERR_NOT_GEOCODED)
        );
        assert_eq!(
            v.validate("los angeles", "City of Los Angeles").await,
            ValidationOutcome::error(ValidationOutcome::ERR_OUTSIDE_DATASET)
        );
        assert_eq!(
            v.validate("ERROR", "City of Sacramento").await,
            ValidationOutcome::error("geocoder responded with HTTP status 503")
        );
    }

    #[tokio::test]
    async fn test_lookup_on_boundary_returns_both_districts() {
        match validator().lookup("edge").await {
            LookupOutcome::Found {
                districts,
                latitude,
                longitude,
                ..
            } => {
                assert_eq!((longitude, latitude), (-121.3, 38.5));
                let names = districts
                    .iter()
                    .filter_map(|d| d.jurisdiction.as_deref())
                    .collect::<Vec<_>>();
                assert_eq!(names, vec!["SACRAMENTO", "UNINCORPORATED"]);
            }
            other => panic!("expected districts, found {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let result = validator().lookup("los angeles").await;
        assert!(matches!(result, LookupOutcome::NotFound { .. }));
        let result = validator().lookup("nowhere").await;
        assert_eq!(
            result,
            LookupOutcome::error(ValidationOutcome::ERR_NOT_GEOCODED)
        );
    }

    /// keeps every formatted log line emitted while tests run
    struct CapturedLog(std::sync::Mutex<Vec<String>>);

    impl log::Log for CapturedLog {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut lines) = self.0.lock() {
                lines.push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static CAPTURED: CapturedLog = CapturedLog(std::sync::Mutex::new(Vec::new()));

    #[tokio::test]
    async fn test_addresses_are_not_logged() {
        let _ = log::set_logger(&CAPTURED);
        log::set_max_level(log::LevelFilter::Trace);
        let v = validator();
        let failed = v.validate("ERROR 1315 Secret St", "City of Sacramento").await;
        assert!(failed.is_error());
        let outside = v.validate("77 Privacy Way, Los Angeles", "City of Los Angeles").await;
        assert!(outside.is_error());
        let lookup = v.lookup("ERROR 1315 Secret St").await;
        assert!(matches!(lookup, LookupOutcome::Error { .. }));

        let lines = CAPTURED.0.lock().expect("test invariant failed");
        assert!(lines.iter().any(|l| l.contains("geocoding failed")));
        assert!(lines.iter().any(|l| l.contains("no district contains")));
        assert!(lines
            .iter()
            .all(|l| !l.contains("Secret St") && !l.contains("Privacy Way")));
    }
}
