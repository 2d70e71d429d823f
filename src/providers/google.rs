//! Google Maps web service clients
//!
//! One async `reqwest` client per provider, built from [`HttpOptions`]. The
//! credential is owned by each client instance.

use super::{
    wire::{
        geolocation_error, GeocodeResponse, GeolocateErrorResponse, GeolocateResponse,
        PlaceSearchResponse,
    },
    GeocodeMatch, GeolocationError, Place, PlaceSearchRequest,
};
use crate::{
    core::{
        config::{ApiKey, FinderConfig, HttpOptions},
        geo::LatLng,
    },
    traits::{Geocoder, Geolocator, PlacesSearch},
    Result,
};
use async_trait::async_trait;

/// Geocoding API client
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    api_key: ApiKey,
    endpoint: String,
}

impl GoogleGeocoder {
    pub fn new(config: &FinderConfig) -> Result<Self> {
        Ok(Self::with_client(
            config.http.build_client()?,
            config.api_key.clone(),
            &config.http.maps_base_url,
        ))
    }

    pub fn with_client(client: reqwest::Client, api_key: ApiKey, base_url: &str) -> Self {
        Self {
            client,
            api_key,
            endpoint: format!("{}/geocode/json", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeMatch>> {
        log::debug!("geocoding {:?}", address);

        let body = self
            .client
            .get(&self.endpoint)
            .query(&[("address", address), ("key", self.api_key.expose())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let response: GeocodeResponse = serde_json::from_str(&body)?;

        log::debug!(
            "geocoding {:?} -> {} ({} results)",
            address,
            response.status,
            response.results.len()
        );
        response.into_matches()
    }
}

/// Places API text search client
#[derive(Debug, Clone)]
pub struct GooglePlaces {
    client: reqwest::Client,
    api_key: ApiKey,
    endpoint: String,
}

impl GooglePlaces {
    pub fn new(config: &FinderConfig) -> Result<Self> {
        Ok(Self::with_client(
            config.http.build_client()?,
            config.api_key.clone(),
            &config.http.maps_base_url,
        ))
    }

    pub fn with_client(client: reqwest::Client, api_key: ApiKey, base_url: &str) -> Self {
        Self {
            client,
            api_key,
            endpoint: format!("{}/place/textsearch/json", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl PlacesSearch for GooglePlaces {
    async fn search(&self, request: &PlaceSearchRequest) -> Result<Vec<Place>> {
        log::debug!(
            "places search {:?} within {} m of {}",
            request.query,
            request.radius_m,
            request.center
        );

        let location = request.center.to_query_param();
        let radius = request.radius_m.to_string();
        let body = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("query", request.query.as_str()),
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("key", self.api_key.expose()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let response: PlaceSearchResponse = serde_json::from_str(&body)?;

        log::debug!(
            "places search -> {} ({} results)",
            response.status,
            response.results.len()
        );
        response.into_places()
    }
}

/// Geolocation API client. Positions come from the caller's network, which
/// is the closest a desktop host gets to a device location fix.
#[derive(Debug, Clone)]
pub struct GoogleGeolocator {
    client: reqwest::Client,
    api_key: ApiKey,
    endpoint: String,
}

impl GoogleGeolocator {
    pub fn new(config: &FinderConfig) -> Result<Self> {
        Ok(Self::with_client(
            config.http.build_client()?,
            config.api_key.clone(),
            &config.http.geolocation_base_url,
        ))
    }

    pub fn with_client(client: reqwest::Client, api_key: ApiKey, base_url: &str) -> Self {
        Self {
            client,
            api_key,
            endpoint: format!("{}/geolocation/v1/geolocate", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl Geolocator for GoogleGeolocator {
    async fn current_position(&self) -> std::result::Result<LatLng, GeolocationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.expose())])
            .json(&serde_json::json!({ "considerIp": true }))
            .send()
            .await
            .map_err(|e| {
                log::debug!("geolocate request failed: {}", e);
                if e.is_timeout() {
                    GeolocationError::Timeout
                } else {
                    GeolocationError::PositionUnavailable
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = response
                .json::<GeolocateErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.reason().map(str::to_string));
            log::debug!("geolocate returned HTTP {} ({:?})", status, reason);
            return Err(geolocation_error(status.as_u16(), reason.as_deref()));
        }

        let body: GeolocateResponse = response.json().await.map_err(|e| {
            log::debug!("geolocate body unreadable: {}", e);
            GeolocationError::PositionUnavailable
        })?;
        log::debug!("geolocate accuracy {:?} m", body.accuracy);

        body.location
            .validate()
            .map_err(|_| GeolocationError::PositionUnavailable)
    }
}

/// Builds the three Google providers from one config
pub fn google_providers(
    config: &FinderConfig,
) -> Result<(GoogleGeocoder, GooglePlaces, GoogleGeolocator)> {
    let client = config.http.build_client()?;
    Ok((
        GoogleGeocoder::with_client(client.clone(), config.api_key.clone(), &config.http.maps_base_url),
        GooglePlaces::with_client(client.clone(), config.api_key.clone(), &config.http.maps_base_url),
        GoogleGeolocator::with_client(
            client,
            config.api_key.clone(),
            &config.http.geolocation_base_url,
        ),
    ))
}
