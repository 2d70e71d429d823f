//! Scripted providers shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use bobamap::prelude::*;
use log::Log;
use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

/// One scripted reply, optionally delayed
pub struct Scripted<T> {
    pub delay: Duration,
    pub reply: T,
}

/// Replies in order; panics when the script runs dry
pub struct ScriptedGeocoder {
    replies: Mutex<VecDeque<Scripted<Result<Vec<GeocodeMatch>>>>>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedGeocoder {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn then(self, reply: Result<Vec<GeocodeMatch>>) -> Self {
        self.then_after(Duration::ZERO, reply)
    }

    pub fn then_after(self, delay: Duration, reply: Result<Vec<GeocodeMatch>>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Scripted { delay, reply });
        self
    }
}

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeMatch>> {
        self.calls.lock().unwrap().push(address.to_string());
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected geocode call");
        if !next.delay.is_zero() {
            tokio::time::sleep(next.delay).await;
        }
        next.reply
    }
}

pub struct ScriptedPlaces {
    replies: Mutex<VecDeque<Scripted<Result<Vec<Place>>>>>,
    pub requests: Mutex<Vec<PlaceSearchRequest>>,
}

impl ScriptedPlaces {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn then(self, reply: Result<Vec<Place>>) -> Self {
        self.then_after(Duration::ZERO, reply)
    }

    pub fn then_after(self, delay: Duration, reply: Result<Vec<Place>>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Scripted { delay, reply });
        self
    }
}

#[async_trait]
impl PlacesSearch for ScriptedPlaces {
    async fn search(&self, request: &PlaceSearchRequest) -> Result<Vec<Place>> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected places call");
        if !next.delay.is_zero() {
            tokio::time::sleep(next.delay).await;
        }
        next.reply
    }
}

pub struct ScriptedGeolocator {
    replies: Mutex<VecDeque<std::result::Result<LatLng, GeolocationError>>>,
}

impl ScriptedGeolocator {
    pub fn new(replies: Vec<std::result::Result<LatLng, GeolocationError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }
}

#[async_trait]
impl Geolocator for ScriptedGeolocator {
    async fn current_position(&self) -> std::result::Result<LatLng, GeolocationError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected geolocation call")
    }
}

pub fn boston() -> LatLng {
    LatLng::new(42.3601, -71.0589)
}

pub fn gong_cha() -> Place {
    Place::new("1", "Gong Cha", LatLng::new(42.3519, -71.0603))
}

pub fn kung_fu_tea() -> Place {
    Place::new("2", "Kung Fu Tea", LatLng::new(42.3493, -71.0621))
}

pub fn provider_error(service: &'static str, status: &str) -> FinderError {
    FinderError::Provider {
        service,
        status: status.to_string(),
        message: None,
    }
}

/// Polls until `count` events have arrived or a second has passed
pub async fn poll_events(finder: &mut BubbleTeaFinder, count: usize) -> Vec<FinderEvent> {
    let mut events = Vec::new();
    let deadline = Instant::now() + Duration::from_secs(1);
    while events.len() < count && Instant::now() < deadline {
        events.extend(finder.poll());
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    events
}

/// A log record kept for assertions
#[derive(Debug, Clone)]
pub struct CapturedRecord {
    pub level: log::Level,
    pub target: String,
    pub message: String,
}

/// Keeps every record and forwards to `env_logger` for `RUST_LOG` output
struct CaptureLogger {
    inner: env_logger::Logger,
    records: Mutex<Vec<CapturedRecord>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        self.records.lock().unwrap().push(CapturedRecord {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        });
        if self.inner.enabled(record.metadata()) {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

static LOGGER: OnceLock<CaptureLogger> = OnceLock::new();

/// Installs the capturing logger, once per binary
pub fn init_logging() {
    let logger = LOGGER.get_or_init(|| CaptureLogger {
        inner: env_logger::Builder::from_default_env()
            .is_test(true)
            .build(),
        records: Mutex::new(Vec::new()),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(log::LevelFilter::Debug);
    }
}

/// Whether a record at `level` from this crate mentions `needle`.
/// Tests in one binary share the log, so pick a needle unique to the test.
pub fn logged(level: log::Level, needle: &str) -> bool {
    LOGGER
        .get()
        .map(|logger| {
            logger.records.lock().unwrap().iter().any(|r| {
                r.level == level && r.target.starts_with("bobamap") && r.message.contains(needle)
            })
        })
        .unwrap_or(false)
}
