use crate::{
    core::geo::LatLng,
    providers::{Place, PlaceId},
};
use serde::{Deserialize, Serialize};

/// Stable handle of a marker. Survives reconciles for as long as the place id
/// stays in the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerHandle(pub u64);

/// A pin for one place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    handle: MarkerHandle,
    id: PlaceId,
    position: LatLng,
    title: String,
}

impl Marker {
    pub fn new(handle: MarkerHandle, place: &Place) -> Self {
        Self {
            handle,
            id: place.id.clone(),
            position: place.location,
            title: place.name.clone(),
        }
    }

    pub fn handle(&self) -> MarkerHandle {
        self.handle
    }

    pub fn id(&self) -> &PlaceId {
        &self.id
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    /// Venue name shown in the info window
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Refreshes position and title from a newer copy of the same place
    pub fn update_from(&mut self, place: &Place) {
        self.position = place.location;
        if self.title != place.name {
            self.title = place.name.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_from_place() {
        let place = Place::new("1", "Gong Cha", LatLng::new(42.3519, -71.0603));
        let mut marker = Marker::new(MarkerHandle(7), &place);

        assert_eq!(marker.handle(), MarkerHandle(7));
        assert_eq!(marker.id().as_str(), "1");
        assert_eq!(marker.title(), "Gong Cha");

        let moved = Place::new("1", "Gong Cha Downtown", LatLng::new(42.3520, -71.0600));
        marker.update_from(&moved);
        assert_eq!(marker.handle(), MarkerHandle(7));
        assert_eq!(marker.title(), "Gong Cha Downtown");
        assert_eq!(marker.position(), moved.location);
    }
}
