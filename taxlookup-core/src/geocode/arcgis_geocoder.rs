use super::{GeocodeError, GeocodeMatch, Geocoder};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// client for the ArcGIS World Geocoding Service `findAddressCandidates`
/// operation. only the single best candidate is requested.
pub struct ArcGisGeocoder {
    client: reqwest::Client,
    url: String,
}

impl ArcGisGeocoder {
    pub const DEFAULT_URL: &str =
        "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/findAddressCandidates";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    pub fn new(url: &str, timeout: Duration) -> Result<ArcGisGeocoder, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeocodeError::ClientError(e.to_string()))?;
        Ok(ArcGisGeocoder {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for ArcGisGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }
        log::debug!("geocoding an address of {} characters", address.chars().count());
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("f", "json"),
                ("singleLine", address),
                ("outFields", "Match_addr"),
                ("maxLocations", "1"),
            ])
            .send()
            .await
            .map_err(|e| GeocodeError::RequestError(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::ResponseStatus(status.as_u16()));
        }
        let body = response
            .text()
            .await
            .map_err(|e| GeocodeError::RequestError(e.to_string()))?;
        let candidates: FindAddressCandidates =
            serde_json::from_str(&body).map_err(|e| GeocodeError::DecodeError(e.to_string()))?;
        candidates.best_match()
    }
}

/// response body of `findAddressCandidates?f=json`. ArcGIS reports request
/// errors with HTTP 200 and an `error` object in place of candidates.
#[derive(Deserialize, Debug)]
struct FindAddressCandidates {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ServiceError>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    address: String,
    location: Location,
    score: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct Location {
    x: f64,
    y: f64,
}

#[derive(Deserialize, Debug)]
struct ServiceError {
    code: i64,
    message: String,
}

impl FindAddressCandidates {
    fn best_match(self) -> Result<Option<GeocodeMatch>, GeocodeError> {
        if let Some(error) = self.error {
            return Err(GeocodeError::ServiceError {
                code: error.code,
                message: error.message,
            });
        }
        let result = self.candidates.into_iter().next().map(|c| GeocodeMatch {
            lat: c.location.y,
            lon: c.location.x,
            matched_address: c.address,
            score: c.score,
        });
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<Option<GeocodeMatch>, GeocodeError> {
        let response: FindAddressCandidates =
            serde_json::from_str(body).expect("test invariant failed");
        response.best_match()
    }

    #[test]
    fn test_first_candidate() {
        let body = r#"{
            "spatialReference": {"wkid": 4326, "latestWkid": 4326},
            "candidates": [{
                "address": "1315 10th St, Sacramento, California, 95814",
                "location": {"x": -121.49339, "y": 38.57661},
                "score": 100,
                "attributes": {"Match_addr": "1315 10th St, Sacramento, California, 95814"},
                "extent": {"xmin": -121.49439, "ymin": 38.57561, "xmax": -121.49239, "ymax": 38.57761}
            }]
        }"#;
        let result = parse(body).expect("test failed").expect("expected a match");
        assert_eq!(
            result.matched_address,
            "1315 10th St, Sacramento, California, 95814"
        );
        assert_eq!(result.lon, -121.49339);
        assert_eq!(result.lat, 38.57661);
        assert_eq!(result.score, Some(100.0));
    }

    #[test]
    fn test_no_candidates() {
        let body = r#"{"spatialReference": {"wkid": 4326}, "candidates": []}"#;
        assert_eq!(parse(body).expect("test failed"), None);
    }

    #[test]
    fn test_service_error() {
        let body = r#"{"error": {"code": 498, "message": "Invalid Token", "details": []}}"#;
        match parse(body) {
            Err(GeocodeError::ServiceError { code, message }) => {
                assert_eq!(code, 498);
                assert_eq!(message, "Invalid Token");
            }
            other => panic!("expected service error, found {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_address_skips_request() {
        // unroutable URL, the request must never be sent
        let geocoder = ArcGisGeocoder::new("http://127.0.0.1:9/", Duration::from_millis(10))
            .expect("test invariant failed");
        let result = geocoder.geocode("   ").await;
        assert!(matches!(result, Err(GeocodeError::EmptyAddress)));
    }
}
