use crate::{
    constants::{MARKER_ICON_ANCHOR, MARKER_ICON_SIZE},
    core::{
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    layers::marker::{Marker, MarkerHandle},
    providers::PlaceId,
};
use serde::{Deserialize, Serialize};

/// One marker as a surface should draw it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerView {
    pub id: PlaceId,
    pub handle: MarkerHandle,
    pub position: LatLng,
    pub title: String,
}

impl From<&Marker> for MarkerView {
    fn from(marker: &Marker) -> Self {
        Self {
            id: marker.id().clone(),
            handle: marker.handle(),
            position: marker.position(),
            title: marker.title().to_string(),
        }
    }
}

/// The open info window, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoWindowView {
    pub anchor: PlaceId,
    pub position: LatLng,
    pub content: String,
}

/// Everything a surface needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapScene {
    pub center: LatLng,
    pub zoom: f64,
    /// Markers in provider order, unique by id
    pub markers: Vec<MarkerView>,
    pub info_window: Option<InfoWindowView>,
}

impl MapScene {
    pub fn marker(&self, id: &PlaceId) -> Option<&MarkerView> {
        self.markers.iter().find(|m| &m.id == id)
    }

    /// Topmost marker whose icon covers `pixel`, in container coordinates.
    /// Later markers are drawn over earlier ones.
    pub fn marker_at(&self, viewport: &Viewport, pixel: &Point) -> Option<&MarkerView> {
        self.markers
            .iter()
            .rev()
            .find(|m| icon_rect(viewport, &m.position).contains(pixel))
    }
}

/// Screen rectangle covered by a marker icon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconRect {
    pub min: Point,
    pub max: Point,
}

impl IconRect {
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Icon placement for a marker: the anchor sits on the projected position
pub fn icon_rect(viewport: &Viewport, position: &LatLng) -> IconRect {
    let tip = viewport.lat_lng_to_pixel(position);
    let min = Point::new(
        tip.x - MARKER_ICON_ANCHOR.0 as f64,
        tip.y - MARKER_ICON_ANCHOR.1 as f64,
    );
    IconRect {
        min,
        max: Point::new(
            min.x + MARKER_ICON_SIZE.0 as f64,
            min.y + MARKER_ICON_SIZE.1 as f64,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(id: &str, position: LatLng, handle: u64) -> MarkerView {
        MarkerView {
            id: PlaceId::from(id),
            handle: MarkerHandle(handle),
            position,
            title: id.to_string(),
        }
    }

    #[test]
    fn test_icon_hangs_above_anchor() {
        let viewport = Viewport::default();
        let rect = icon_rect(&viewport, &viewport.center);

        assert_eq!(rect.min, Point::new(388.0, 259.0));
        assert_eq!(rect.max, Point::new(413.0, 300.0));
        assert!(rect.contains(&Point::new(400.0, 290.0)));
        assert!(!rect.contains(&Point::new(400.0, 310.0)));
    }

    #[test]
    fn test_marker_at_prefers_topmost() {
        let viewport = Viewport::default();
        let scene = MapScene {
            center: viewport.center,
            zoom: viewport.zoom,
            markers: vec![
                view("below", viewport.center, 1),
                view("above", viewport.center, 2),
            ],
            info_window: None,
        };

        let hit = scene.marker_at(&viewport, &Point::new(400.0, 290.0));
        assert_eq!(hit.map(|m| m.id.as_str()), Some("above"));
        assert!(scene.marker_at(&viewport, &Point::new(10.0, 10.0)).is_none());
    }
}
