//! The bubble tea finder widget
//!
//! [`BubbleTeaFinder`] is the state container behind the UI: it records the
//! city field, runs the geocode-then-search pipeline against the configured
//! providers, keeps the marker set and the shared info window in step with
//! the latest results, and produces a [`MapScene`] for whatever surface draws
//! the map.
//!
//! Every search and location request takes a sequence number. A completion
//! that arrives after a newer request has started is dropped, so the last
//! request the user made is the one whose results stay on screen.

use super::{
    outcome::{FinderEvent, LocateOutcome, SearchOutcome},
    state::SearchState,
};
use crate::{
    core::{
        config::{FinderConfig, SearchOptions, ViewportPolicy},
        geo::{LatLng, LatLngBounds, Point},
        viewport::Viewport,
    },
    layers::manager::MarkerSet,
    prelude::{Arc, Future},
    providers::{google::google_providers, GeolocationError, Place, PlaceId, PlaceSearchRequest},
    runtime::AsyncHandle,
    traits::{Geocoder, Geolocator, MapSurface, PlacesSearch},
    ui::{
        popup::InfoWindow,
        scene::{InfoWindowView, MapScene, MarkerView},
    },
    FinderError, Result,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;

type SearchResult = Result<(LatLng, Vec<Place>)>;

/// Work finished on the runtime, waiting for `poll`
enum Completion {
    Search {
        sequence: u64,
        result: SearchResult,
    },
    Locate {
        sequence: u64,
        result: std::result::Result<LatLng, GeolocationError>,
    },
}

pub struct BubbleTeaFinder {
    config: FinderConfig,
    geocoder: Arc<dyn Geocoder>,
    places: Arc<dyn PlacesSearch>,
    geolocator: Arc<dyn Geolocator>,
    state: SearchState,
    markers: MarkerSet,
    info_window: InfoWindow,
    viewport: Viewport,
    /// Newest search attempt started
    search_seq: u64,
    /// Newest location request started
    locate_seq: u64,
    /// Spawned searches whose completion `poll` has not drained yet
    pending_searches: usize,
    /// Spawned location requests whose completion `poll` has not drained yet
    pending_locates: usize,
    tasks: Vec<Box<dyn AsyncHandle>>,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
}

impl BubbleTeaFinder {
    pub fn new(
        config: FinderConfig,
        geocoder: impl Geocoder + 'static,
        places: impl PlacesSearch + 'static,
        geolocator: impl Geolocator + 'static,
    ) -> Self {
        Self::from_providers(
            config,
            Arc::new(geocoder),
            Arc::new(places),
            Arc::new(geolocator),
        )
    }

    pub fn from_providers(
        config: FinderConfig,
        geocoder: Arc<dyn Geocoder>,
        places: Arc<dyn PlacesSearch>,
        geolocator: Arc<dyn Geolocator>,
    ) -> Self {
        let viewport = Viewport::new(
            config.map.initial_center,
            config.map.initial_zoom,
            Point::new(800.0, 600.0),
        );
        let (completion_tx, completion_rx) = unbounded();

        Self {
            config,
            geocoder,
            places,
            geolocator,
            state: SearchState::new(),
            markers: MarkerSet::new(),
            info_window: InfoWindow::new(),
            viewport,
            search_seq: 0,
            locate_seq: 0,
            pending_searches: 0,
            pending_locates: 0,
            tasks: Vec::new(),
            completion_tx,
            completion_rx,
        }
    }

    /// Finder backed by the Google geocoding, places and geolocation services
    pub fn with_google(config: FinderConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            log::warn!("no API key configured; every provider call will be rejected");
        }
        let (geocoder, places, geolocator) = google_providers(&config)?;
        Ok(Self::new(config, geocoder, places, geolocator))
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn city_name(&self) -> &str {
        self.state.city_name()
    }

    pub fn resolved_location(&self) -> Option<LatLng> {
        self.state.resolved_location()
    }

    pub fn places(&self) -> &[Place] {
        self.state.places()
    }

    pub fn device_location(&self) -> Option<LatLng> {
        self.state.device_location()
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn info_window(&self) -> &InfoWindow {
        &self.info_window
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Surfaces use this to pan, zoom and resize the map
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// True while a submitted search has not come back through `poll`.
    /// Awaited searches hold `&mut self` until they finish and are never counted.
    pub fn is_searching(&self) -> bool {
        self.pending_searches > 0
    }

    pub fn is_locating(&self) -> bool {
        self.pending_locates > 0
    }

    /// Records the city field. Any text is accepted, including empty.
    pub fn set_city_name(&mut self, city_name: impl Into<String>) {
        self.state.set_city_name(city_name.into());
    }

    /// Geocodes the city field and searches around the first match, applying
    /// the result before returning.
    pub async fn search(&mut self) -> SearchOutcome {
        let sequence = self.begin_search();
        let work = resolve_and_search(
            self.geocoder.clone(),
            self.places.clone(),
            self.city_name().to_string(),
            self.config.search.clone(),
        );
        let result = guarded(work).await;
        self.apply_search(sequence, result)
    }

    /// Starts the same pipeline as [`search`](Self::search) on the runtime.
    /// The outcome arrives through [`poll`](Self::poll).
    pub fn submit_search(&mut self) -> u64 {
        let work = resolve_and_search(
            self.geocoder.clone(),
            self.places.clone(),
            self.city_name().to_string(),
            self.config.search.clone(),
        );
        self.spawn_search(work)
    }

    /// Searches around the recorded device location, skipping geocoding
    pub async fn search_near_device(&mut self) -> SearchOutcome {
        let sequence = self.begin_search();
        let result = match self.device_location() {
            Some(center) => {
                guarded(search_around(
                    self.places.clone(),
                    center,
                    self.config.search.clone(),
                ))
                .await
            }
            None => Err(FinderError::NoDeviceLocation),
        };
        self.apply_search(sequence, result)
    }

    pub fn submit_search_near_device(&mut self) -> u64 {
        let places = self.places.clone();
        let device_location = self.device_location();
        let options = self.config.search.clone();
        self.spawn_search(async move {
            match device_location {
                Some(center) => search_around(places, center, options).await,
                None => Err(FinderError::NoDeviceLocation),
            }
        })
    }

    /// Asks the geolocator for the device position and records it
    pub async fn locate_device(&mut self) -> LocateOutcome {
        let sequence = self.begin_locate();
        let result = guarded_locate(self.geolocator.clone()).await;
        self.apply_locate(sequence, result)
    }

    pub fn request_device_location(&mut self) -> u64 {
        let sequence = self.begin_locate();
        self.pending_locates += 1;
        let geolocator = self.geolocator.clone();
        let tx = self.completion_tx.clone();
        let handle = crate::runtime::spawn(async move {
            let result = guarded_locate(geolocator).await;
            let _ = tx.send(Completion::Locate { sequence, result });
        });
        self.tasks.push(handle);
        sequence
    }

    /// Applies every completion that has arrived since the last call.
    /// Call once per UI frame.
    pub fn poll(&mut self) -> Vec<FinderEvent> {
        self.tasks.retain(|task| !task.is_finished());

        let completions: Vec<_> = self.completion_rx.try_iter().collect();
        completions
            .into_iter()
            .map(|completion| match completion {
                Completion::Search { sequence, result } => {
                    self.pending_searches = self.pending_searches.saturating_sub(1);
                    FinderEvent::Search(self.apply_search(sequence, result))
                }
                Completion::Locate { sequence, result } => {
                    self.pending_locates = self.pending_locates.saturating_sub(1);
                    FinderEvent::Locate(self.apply_locate(sequence, result))
                }
            })
            .collect()
    }

    /// Opens the shared info window on a marker. Unknown ids leave it as is.
    pub fn click_marker(&mut self, id: &PlaceId) -> bool {
        match self.markers.get(id) {
            Some(marker) => {
                self.info_window.open(marker);
                true
            }
            None => {
                log::debug!("click on unknown marker {}", id);
                false
            }
        }
    }

    pub fn close_info_window(&mut self) {
        self.info_window.close();
    }

    pub fn scene(&self) -> MapScene {
        let info_window = match (self.info_window.is_open(), self.info_window.anchor()) {
            (true, Some(anchor)) => Some(InfoWindowView {
                anchor: anchor.clone(),
                position: self.info_window.position(),
                content: self.info_window.content().to_string(),
            }),
            _ => None,
        };

        MapScene {
            center: self.viewport.center,
            zoom: self.viewport.zoom,
            markers: self.markers.iter().map(MarkerView::from).collect(),
            info_window,
        }
    }

    pub fn render(&self, surface: &mut dyn MapSurface) -> Result<()> {
        surface.render(&self.scene())
    }

    fn begin_search(&mut self) -> u64 {
        self.search_seq += 1;
        if self.city_name().trim().is_empty() {
            log::debug!("search #{} started with an empty city name", self.search_seq);
        }
        self.search_seq
    }

    fn begin_locate(&mut self) -> u64 {
        self.locate_seq += 1;
        self.locate_seq
    }

    fn spawn_search<F>(&mut self, work: F) -> u64
    where
        F: Future<Output = SearchResult> + Send + 'static,
    {
        let sequence = self.begin_search();
        self.pending_searches += 1;
        let tx = self.completion_tx.clone();
        let handle = crate::runtime::spawn(async move {
            let result = guarded(work).await;
            let _ = tx.send(Completion::Search { sequence, result });
        });
        self.tasks.push(handle);
        sequence
    }

    fn apply_search(&mut self, sequence: u64, result: SearchResult) -> SearchOutcome {
        if sequence < self.search_seq {
            log::debug!(
                "discarding search #{}; #{} is newer",
                sequence,
                self.search_seq
            );
            return SearchOutcome::Discarded { sequence };
        }

        match result {
            Ok((location, places)) => {
                let count = places.len();
                log::info!("search #{}: {} places near {}", sequence, count, location);

                self.state.commit_search(location, places);
                self.markers.reconcile(self.state.places());
                let anchor = self.info_window.anchor().cloned();
                self.info_window
                    .follow(anchor.as_ref().and_then(|id| self.markers.get(id)));
                self.follow_results(location);

                SearchOutcome::Found {
                    sequence,
                    location,
                    count,
                }
            }
            Err(error) => {
                log::warn!(
                    "search #{} for {:?} failed: {}",
                    sequence,
                    self.state.city_name(),
                    error
                );
                SearchOutcome::Failed { sequence, error }
            }
        }
    }

    fn apply_locate(
        &mut self,
        sequence: u64,
        result: std::result::Result<LatLng, GeolocationError>,
    ) -> LocateOutcome {
        if sequence < self.locate_seq {
            log::debug!(
                "discarding location #{}; #{} is newer",
                sequence,
                self.locate_seq
            );
            return LocateOutcome::Discarded { sequence };
        }

        match result {
            Ok(location) => {
                log::info!("device location: {}", location);
                self.state.set_device_location(location);
                LocateOutcome::Located { sequence, location }
            }
            Err(error) => {
                log::warn!("error getting device location: {}", error);
                LocateOutcome::Failed { sequence, error }
            }
        }
    }

    fn follow_results(&mut self, location: LatLng) {
        if self.config.map.viewport_policy != ViewportPolicy::FitResults {
            return;
        }
        match LatLngBounds::from_points(self.state.places().iter().map(|p| &p.location)) {
            Some(bounds) => self
                .viewport
                .fit_bounds(&bounds, self.config.map.fit_padding),
            None => self.viewport.set_center(location),
        }
    }
}

impl Drop for BubbleTeaFinder {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.cancel();
        }
    }
}

async fn resolve_and_search(
    geocoder: Arc<dyn Geocoder>,
    places: Arc<dyn PlacesSearch>,
    address: String,
    options: SearchOptions,
) -> SearchResult {
    let matches = geocoder.geocode(&address).await?;
    // first match wins
    let first = matches
        .into_iter()
        .next()
        .ok_or(FinderError::NoResults { address })?;

    search_around(places, first.location, options).await
}

async fn search_around(
    places: Arc<dyn PlacesSearch>,
    center: LatLng,
    options: SearchOptions,
) -> SearchResult {
    let request = PlaceSearchRequest::new(center, &options);
    let found = places.search(&request).await?;
    Ok((center, found))
}

/// Turns a panicking provider into an ordinary failure
async fn guarded<T>(work: impl Future<Output = Result<T>>) -> Result<T> {
    match AssertUnwindSafe(work).catch_unwind().await {
        Ok(result) => result,
        Err(_) => {
            log::error!("provider panicked");
            Err(FinderError::Aborted("provider panicked".to_string()))
        }
    }
}

async fn guarded_locate(
    geolocator: Arc<dyn Geolocator>,
) -> std::result::Result<LatLng, GeolocationError> {
    match AssertUnwindSafe(geolocator.current_position())
        .catch_unwind()
        .await
    {
        Ok(result) => result,
        Err(_) => {
            log::error!("geolocator panicked");
            Err(GeolocationError::PositionUnavailable)
        }
    }
}
