//! Provider data types and implementations

pub mod google;
pub mod location;
pub mod wire;

use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Provider-assigned identifier of a venue, unique within one result set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(pub String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlaceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A venue returned by a places search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub location: LatLng,
}

impl Place {
    pub fn new(id: impl Into<PlaceId>, name: impl Into<String>, location: LatLng) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }

    /// Distance in metres from `origin`
    pub fn distance_from(&self, origin: &LatLng) -> f64 {
        self.location.distance_to(origin)
    }
}

/// One candidate returned by the geocoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeMatch {
    pub location: LatLng,
    pub formatted_address: Option<String>,
}

impl GeocodeMatch {
    pub fn new(location: LatLng) -> Self {
        Self {
            location,
            formatted_address: None,
        }
    }
}

/// Parameters of one places search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSearchRequest {
    pub center: LatLng,
    pub radius_m: u32,
    pub query: String,
}

impl PlaceSearchRequest {
    pub fn new(center: LatLng, options: &crate::core::config::SearchOptions) -> Self {
        Self {
            center,
            radius_m: options.radius_m,
            query: options.query.clone(),
        }
    }
}

/// Why the device location could not be obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum GeolocationError {
    #[error("geolocation is not supported on this host")]
    Unsupported,
    #[error("permission to read the device location was denied")]
    PermissionDenied,
    #[error("device location is unavailable")]
    PositionUnavailable,
    #[error("timed out waiting for the device location")]
    Timeout,
}
