//! Defaults shared by the finder, the providers and the map surface.
//! Keeping them in a single place makes it easier to tweak widget-wide magic numbers.

/// Radius of every places search, in metres.
pub const DEFAULT_SEARCH_RADIUS_M: u32 = 5_000;

/// Keyword query sent to the places provider.
pub const DEFAULT_PLACES_QUERY: &str = "bubble-tea | boba | gong-cha ";

/// Initial map centre (New York City).
pub const DEFAULT_CENTER: (f64, f64) = (40.7128, -74.0060);

/// Initial map zoom level.
pub const DEFAULT_ZOOM: f64 = 10.0;

/// Zoom limits enforced by the viewport.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Default square tile size in pixels, used by the Web Mercator projection.
pub const TILE_SIZE: f64 = 256.0;

/// Marker icon default size (regular PNG).
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);

/// Anchor inside the icon (hot-spot) in pixel coords.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (12, 41);

/// Environment variable read by `FinderConfig::from_env`.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Base URL of the Google Maps web services.
pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Base URL of the Google Geolocation API.
pub const GOOGLE_GEOLOCATION_BASE_URL: &str = "https://www.googleapis.com";
