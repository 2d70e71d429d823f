//! Configuration for the finder and its providers
//!
//! Everything the widget needs from the outside world is collected in
//! [`FinderConfig`] and handed to the constructor. Nothing here is read from
//! global state after construction.

use crate::constants::{
    API_KEY_ENV, DEFAULT_PLACES_QUERY, DEFAULT_SEARCH_RADIUS_M, DEFAULT_ZOOM,
    GOOGLE_GEOLOCATION_BASE_URL, GOOGLE_MAPS_BASE_URL,
};
use crate::core::geo::LatLng;
use crate::{FinderError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Credential for the mapping provider. Redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            f.write_str("ApiKey(<empty>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}

/// Whether the map follows search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewportPolicy {
    /// Keep the initial center and zoom no matter where results land
    #[default]
    Fixed,
    /// Recenter on the bounds of each completed result set
    FitResults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Search radius around the resolved location, in metres
    pub radius_m: u32,
    /// Keyword query sent to the places provider
    pub query: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_SEARCH_RADIUS_M,
            query: DEFAULT_PLACES_QUERY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    pub initial_center: LatLng,
    pub initial_zoom: f64,
    pub viewport_policy: ViewportPolicy,
    /// Padding in pixels kept around results when fitting the viewport
    pub fit_padding: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            initial_center: LatLng::default(),
            initial_zoom: DEFAULT_ZOOM,
            viewport_policy: ViewportPolicy::Fixed,
            fit_padding: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpOptions {
    pub user_agent: String,
    #[serde(with = "duration_millis")]
    pub timeout: Duration,
    /// Base URL of the geocoding and places web services
    pub maps_base_url: String,
    /// Base URL of the geolocation service
    pub geolocation_base_url: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            user_agent: format!("bobamap/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(10),
            maps_base_url: GOOGLE_MAPS_BASE_URL.to_string(),
            geolocation_base_url: GOOGLE_GEOLOCATION_BASE_URL.to_string(),
        }
    }
}

impl HttpOptions {
    /// Builds the async client every provider shares
    pub fn build_client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(self.timeout)
            .build()?)
    }
}

/// Top-level configuration passed to `BubbleTeaFinder::new`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    pub api_key: ApiKey,
    pub search: SearchOptions,
    pub map: MapOptions,
    pub http: HttpOptions,
}

impl FinderConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            ..Default::default()
        }
    }

    /// Reads the API key from `GOOGLE_MAPS_API_KEY`, everything else defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(ApiKey::new(key))),
            _ => Err(FinderError::MissingApiKey(API_KEY_ENV)),
        }
    }

    pub fn with_viewport_policy(mut self, policy: ViewportPolicy) -> Self {
        self.map.viewport_policy = policy;
        self
    }

    pub fn with_search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
