//! # bobamap
//!
//! A small map widget that finds bubble tea shops near a city.
//!
//! The crate is split into a headless core and an optional egui front end:
//! provider clients resolve a city name to coordinates and search nearby
//! venues, [`BubbleTeaFinder`] owns the widget state, and a [`MapScene`]
//! describes what a rendering surface should draw.

pub mod core;
pub mod layers;
#[cfg(feature = "debug")]
pub mod logging;
pub mod prelude;
pub mod providers;
pub mod runtime;
pub mod search;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::{ApiKey, FinderConfig, HttpOptions, MapOptions, SearchOptions, ViewportPolicy},
    geo::{LatLng, LatLngBounds, Point},
    viewport::Viewport,
};

pub use layers::{manager::MarkerSet, marker::Marker};

pub use providers::{
    google::{GoogleGeocoder, GoogleGeolocator, GooglePlaces},
    location::{FixedGeolocator, UnsupportedGeolocator},
    GeocodeMatch, GeolocationError, Place, PlaceId, PlaceSearchRequest,
};

pub use search::{
    finder::BubbleTeaFinder,
    outcome::{FinderEvent, LocateOutcome, SearchOutcome},
    state::SearchState,
};

pub use traits::{Geocoder, Geolocator, MapSurface, PlacesSearch};

pub use ui::{
    popup::InfoWindow,
    scene::{InfoWindowView, MapScene, MarkerView},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, FinderError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{service} returned status {status}{}", provider_detail(.message))]
    Provider {
        service: &'static str,
        status: String,
        message: Option<String>,
    },

    #[error("No geocoding results for {address:?}")]
    NoResults { address: String },

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("No device location has been recorded")]
    NoDeviceLocation,

    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),

    #[error("Provider call aborted: {0}")]
    Aborted(String),
}

/// Error type alias for convenience
pub type Error = FinderError;

fn provider_detail(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {message}"),
        None => String::new(),
    }
}
