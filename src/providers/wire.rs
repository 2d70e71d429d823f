//! JSON payloads of the Google Maps web services and their status gating

use super::{GeocodeMatch, GeolocationError, Place};
use crate::{core::geo::LatLng, FinderError, Result};
use serde::Deserialize;

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WireLatLng {
    pub lat: f64,
    pub lng: f64,
}

impl WireLatLng {
    pub fn validate(self) -> Result<LatLng> {
        LatLng::try_new(self.lat, self.lng)
    }
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: WireLatLng,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

/// Body of `GET /geocode/json`
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

impl GeocodeResponse {
    /// `OK` yields the matches, `ZERO_RESULTS` an empty list, anything else an error.
    ///
    /// The first candidate is the one a search uses, so unusable coordinates
    /// there fail the whole response. Later candidates with unusable
    /// coordinates are dropped.
    pub fn into_matches(self) -> Result<Vec<GeocodeMatch>> {
        gate_status("geocoding", &self.status, self.error_message)?;

        let mut results = self.results.into_iter();
        let Some(first) = results.next() else {
            return Ok(Vec::new());
        };

        let mut matches = vec![GeocodeMatch {
            location: first.geometry.location.validate()?,
            formatted_address: first.formatted_address,
        }];
        matches.extend(results.filter_map(|result| {
            match result.geometry.location.validate() {
                Ok(location) => Some(GeocodeMatch {
                    location,
                    formatted_address: result.formatted_address,
                }),
                Err(e) => {
                    log::warn!("dropping geocode match: {}", e);
                    None
                }
            }
        }));
        Ok(matches)
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    pub geometry: Geometry,
}

/// Body of `GET /place/textsearch/json`
#[derive(Debug, Deserialize)]
pub struct PlaceSearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    pub error_message: Option<String>,
    pub next_page_token: Option<String>,
}

impl PlaceSearchResponse {
    /// Places in provider order. Same status rules as geocoding.
    pub fn into_places(self) -> Result<Vec<Place>> {
        gate_status("places", &self.status, self.error_message)?;

        if self.next_page_token.is_some() {
            log::debug!("places search has more pages; only the first is used");
        }

        Ok(self
            .results
            .into_iter()
            .filter_map(|result| match result.geometry.location.validate() {
                Ok(location) => Some(Place::new(result.place_id, result.name, location)),
                Err(e) => {
                    log::warn!("dropping place {}: {}", result.place_id, e);
                    None
                }
            })
            .collect())
    }
}

/// Body of a successful `POST /geolocation/v1/geolocate`
#[derive(Debug, Deserialize)]
pub struct GeolocateResponse {
    pub location: WireLatLng,
    pub accuracy: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct GeolocateErrorReason {
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct GeolocateErrorDetail {
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<GeolocateErrorReason>,
}

/// Body of a failed geolocate call
#[derive(Debug, Deserialize)]
pub struct GeolocateErrorResponse {
    pub error: GeolocateErrorDetail,
}

impl GeolocateErrorResponse {
    pub fn reason(&self) -> Option<&str> {
        self.error.errors.first().map(|e| e.reason.as_str())
    }
}

/// Maps a geolocate HTTP failure onto the device-location error taxonomy
pub fn geolocation_error(status: u16, reason: Option<&str>) -> GeolocationError {
    match (status, reason) {
        (_, Some("notFound")) => GeolocationError::PositionUnavailable,
        (_, Some("keyInvalid" | "accessNotConfigured" | "userRateLimitExceeded" | "dailyLimitExceeded")) => {
            GeolocationError::PermissionDenied
        }
        (401 | 403, _) => GeolocationError::PermissionDenied,
        (408 | 504, _) => GeolocationError::Timeout,
        _ => GeolocationError::PositionUnavailable,
    }
}

fn gate_status(service: &'static str, status: &str, message: Option<String>) -> Result<()> {
    match status {
        STATUS_OK | STATUS_ZERO_RESULTS => Ok(()),
        other => Err(FinderError::Provider {
            service,
            status: other.to_string(),
            message,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOSTON_GEOCODE: &str = r#"{
        "results": [
            {
                "formatted_address": "Boston, MA, USA",
                "geometry": {
                    "location": { "lat": 42.3601, "lng": -71.0589 },
                    "location_type": "APPROXIMATE"
                },
                "place_id": "ChIJGzE9DS1l44kRoOhiASS_fHg"
            },
            {
                "formatted_address": "Boston, UK",
                "geometry": { "location": { "lat": 52.9789, "lng": -0.0266 } }
            }
        ],
        "status": "OK"
    }"#;

    #[test]
    fn test_geocode_ok_keeps_order() {
        let response: GeocodeResponse = serde_json::from_str(BOSTON_GEOCODE).unwrap();
        let matches = response.into_matches().unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].location, LatLng::new(42.3601, -71.0589));
        assert_eq!(matches[0].formatted_address.as_deref(), Some("Boston, MA, USA"));
    }

    #[test]
    fn test_geocode_zero_results() {
        let response: GeocodeResponse =
            serde_json::from_str(r#"{ "results": [], "status": "ZERO_RESULTS" }"#).unwrap();
        assert!(response.into_matches().unwrap().is_empty());
    }

    #[test]
    fn test_geocode_denied_is_provider_error() {
        let response: GeocodeResponse = serde_json::from_str(
            r#"{
                "error_message": "The provided API key is invalid.",
                "results": [],
                "status": "REQUEST_DENIED"
            }"#,
        )
        .unwrap();

        match response.into_matches() {
            Err(FinderError::Provider {
                service,
                status,
                message,
            }) => {
                assert_eq!(service, "geocoding");
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message.as_deref(), Some("The provided API key is invalid."));
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_geocode_invalid_first_match_fails() {
        let response: GeocodeResponse = serde_json::from_str(
            r#"{
                "results": [
                    { "geometry": { "location": { "lat": 123.0, "lng": 0.0 } } },
                    { "geometry": { "location": { "lat": 42.3601, "lng": -71.0589 } } }
                ],
                "status": "OK"
            }"#,
        )
        .unwrap();

        assert!(matches!(
            response.into_matches(),
            Err(FinderError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_geocode_drops_invalid_later_matches() {
        let response: GeocodeResponse = serde_json::from_str(
            r#"{
                "results": [
                    { "geometry": { "location": { "lat": 42.3601, "lng": -71.0589 } } },
                    { "geometry": { "location": { "lat": 0.0, "lng": 200.0 } } }
                ],
                "status": "OK"
            }"#,
        )
        .unwrap();

        let matches = response.into_matches().unwrap();
        assert_eq!(matches, vec![GeocodeMatch::new(LatLng::new(42.3601, -71.0589))]);
    }

    #[test]
    fn test_malformed_body_is_serialization_error() {
        let err: FinderError = serde_json::from_str::<GeocodeResponse>(r#"{ "results": [] }"#)
            .unwrap_err()
            .into();
        assert!(matches!(err, FinderError::Serialization(_)));
    }

    #[test]
    fn test_places_ok() {
        let response: PlaceSearchResponse = serde_json::from_str(
            r#"{
                "html_attributions": [],
                "next_page_token": "token",
                "results": [
                    {
                        "place_id": "1",
                        "name": "Gong Cha",
                        "geometry": { "location": { "lat": 42.3519, "lng": -71.0603 } },
                        "rating": 4.3
                    },
                    {
                        "place_id": "2",
                        "name": "Kung Fu Tea",
                        "geometry": { "location": { "lat": 42.3493, "lng": -71.0621 } }
                    }
                ],
                "status": "OK"
            }"#,
        )
        .unwrap();

        let places = response.into_places().unwrap();
        let names: Vec<_> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Gong Cha", "Kung Fu Tea"]);
        assert_eq!(places[0].id.as_str(), "1");
        assert_eq!(places[1].location, LatLng::new(42.3493, -71.0621));
    }

    #[test]
    fn test_places_zero_results_is_empty_success() {
        let response: PlaceSearchResponse =
            serde_json::from_str(r#"{ "results": [], "status": "ZERO_RESULTS" }"#).unwrap();
        assert!(response.into_places().unwrap().is_empty());
    }

    #[test]
    fn test_places_over_limit() {
        let response: PlaceSearchResponse =
            serde_json::from_str(r#"{ "status": "OVER_QUERY_LIMIT" }"#).unwrap();
        assert!(matches!(
            response.into_places(),
            Err(FinderError::Provider { service: "places", .. })
        ));
    }

    #[test]
    fn test_geolocate_payloads() {
        let ok: GeolocateResponse = serde_json::from_str(
            r#"{ "location": { "lat": 42.36, "lng": -71.06 }, "accuracy": 1200.0 }"#,
        )
        .unwrap();
        assert_eq!(ok.location.validate().unwrap(), LatLng::new(42.36, -71.06));

        let err: GeolocateErrorResponse = serde_json::from_str(
            r#"{
                "error": {
                    "errors": [{ "domain": "geolocation", "reason": "notFound", "message": "Not Found" }],
                    "code": 404,
                    "message": "Not Found"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(err.reason(), Some("notFound"));
        assert_eq!(
            geolocation_error(err.error.code, err.reason()),
            GeolocationError::PositionUnavailable
        );
    }

    #[test]
    fn test_geolocation_error_mapping() {
        assert_eq!(geolocation_error(403, None), GeolocationError::PermissionDenied);
        assert_eq!(
            geolocation_error(400, Some("keyInvalid")),
            GeolocationError::PermissionDenied
        );
        assert_eq!(geolocation_error(504, None), GeolocationError::Timeout);
        assert_eq!(geolocation_error(500, None), GeolocationError::PositionUnavailable);
    }
}
