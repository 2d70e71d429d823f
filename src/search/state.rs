use crate::{core::geo::LatLng, providers::Place};

/// Form and result state owned by one finder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    city_name: String,
    resolved_location: Option<LatLng>,
    places: Vec<Place>,
    device_location: Option<LatLng>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently in the city field
    pub fn city_name(&self) -> &str {
        &self.city_name
    }

    /// Center of the most recent completed search
    pub fn resolved_location(&self) -> Option<LatLng> {
        self.resolved_location
    }

    /// Venues of the most recent completed search, in provider order
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn device_location(&self) -> Option<LatLng> {
        self.device_location
    }

    pub(crate) fn set_city_name(&mut self, city_name: String) {
        self.city_name = city_name;
    }

    pub(crate) fn set_device_location(&mut self, location: LatLng) {
        self.device_location = Some(location);
    }

    /// Location and places are committed together so a search is never half applied
    pub(crate) fn commit_search(&mut self, location: LatLng, places: Vec<Place>) {
        self.resolved_location = Some(location);
        self.places = places;
    }
}
