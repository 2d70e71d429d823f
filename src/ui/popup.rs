use crate::{core::geo::LatLng, layers::marker::Marker, providers::PlaceId};

/// The single info window shared by every marker.
///
/// Opening it on a marker replaces whatever it showed before; there is never
/// more than one popup on the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoWindow {
    anchor: Option<PlaceId>,
    position: LatLng,
    content: String,
    visible: bool,
}

impl InfoWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the marker's venue name anchored at the marker
    pub fn open(&mut self, marker: &Marker) {
        self.anchor = Some(marker.id().clone());
        self.position = marker.position();
        self.content = marker.title().to_string();
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.anchor = None;
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Marker the window is attached to while open
    pub fn anchor(&self) -> Option<&PlaceId> {
        self.anchor.as_ref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    /// Re-reads the anchor after a reconcile; closes when it is gone.
    pub fn follow(&mut self, marker: Option<&Marker>) {
        match marker {
            Some(marker) if self.visible => self.open(marker),
            _ => self.close(),
        }
    }
}
