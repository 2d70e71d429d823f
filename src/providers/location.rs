use super::GeolocationError;
use crate::{core::geo::LatLng, traits::Geolocator};
use async_trait::async_trait;

/// Reports a position configured up front, e.g. from a command line flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGeolocator {
    position: LatLng,
}

impl FixedGeolocator {
    pub fn new(position: LatLng) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        if self.position.is_valid() {
            Ok(self.position)
        } else {
            Err(GeolocationError::PositionUnavailable)
        }
    }
}

/// Stand-in for hosts with no location capability at all
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedGeolocator;

#[async_trait]
impl Geolocator for UnsupportedGeolocator {
    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}
