//! Shared trait abstractions
//!
//! These are the seams between the finder and the outside world: three
//! provider capabilities and the surface that draws a [`MapScene`].

use crate::{
    core::geo::LatLng,
    providers::{GeocodeMatch, GeolocationError, Place, PlaceSearchRequest},
    ui::scene::MapScene,
    Result,
};
use async_trait::async_trait;

/// Converts a free-text address into candidate coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Candidates in provider order. Zero matches is `Ok(vec![])`.
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeMatch>>;
}

/// Finds venues around a coordinate
#[async_trait]
pub trait PlacesSearch: Send + Sync {
    /// Venues in provider order, no pagination beyond the first page
    async fn search(&self, request: &PlaceSearchRequest) -> Result<Vec<Place>>;
}

/// Reports where the device currently is
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> std::result::Result<LatLng, GeolocationError>;
}

/// Anything that can draw a map scene.
///
/// The finder only describes what should be on screen; surfaces own drawing
/// and gesture handling.
pub trait MapSurface {
    fn render(&mut self, scene: &MapScene) -> Result<()>;
}
