//! Prelude module for common bobamap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use bobamap::prelude::*;`

pub use crate::core::{
    config::{ApiKey, FinderConfig, HttpOptions, MapOptions, SearchOptions, ViewportPolicy},
    geo::{LatLng, LatLngBounds, Point},
    viewport::Viewport,
};

pub use crate::layers::{
    manager::{MarkerDiff, MarkerSet},
    marker::{Marker, MarkerHandle},
};

pub use crate::providers::{
    google::{google_providers, GoogleGeocoder, GoogleGeolocator, GooglePlaces},
    location::{FixedGeolocator, UnsupportedGeolocator},
    GeocodeMatch, GeolocationError, Place, PlaceId, PlaceSearchRequest,
};

pub use crate::search::{
    finder::BubbleTeaFinder,
    outcome::{FinderEvent, LocateOutcome, SearchOutcome},
    state::SearchState,
};

pub use crate::traits::{Geocoder, Geolocator, MapSurface, PlacesSearch};

pub use crate::ui::{
    popup::InfoWindow,
    scene::{InfoWindowView, MapScene, MarkerView},
};

#[cfg(feature = "egui")]
pub use crate::ui::widget::{EguiMapSurface, FinderPanel};

pub use crate::runtime::{runtime, spawn, AsyncHandle, AsyncSpawner};

pub use crate::{Error as FinderError, Result};

pub use std::{
    pin::Pin,
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub use futures::Future;
