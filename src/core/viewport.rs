use crate::constants::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use crate::core::geo::{LatLng, LatLngBounds, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Web Mercator projection constants
const EARTH_RADIUS: f64 = 6378137.0;
const MAX_LATITUDE: f64 = 85.0511287798;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size,
        }
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Projects a LatLng to world pixel coordinates at the current zoom level (EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        let scale = TILE_SIZE * 2_f64.powf(self.zoom);
        let lat = lat_lng.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);

        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let y = (PI / 4.0 + lat.to_radians() / 2.0).tan().ln() * EARTH_RADIUS;

        let world = 2.0 * PI * EARTH_RADIUS;
        Point::new(
            (x + PI * EARTH_RADIUS) / world * scale,
            (-y + PI * EARTH_RADIUS) / world * scale,
        )
    }

    /// Unprojects world pixel coordinates back to LatLng at the current zoom level
    pub fn unproject(&self, pixel: &Point) -> LatLng {
        let scale = TILE_SIZE * 2_f64.powf(self.zoom);
        let world = 2.0 * PI * EARTH_RADIUS;

        let x = pixel.x / scale * world - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - pixel.y / scale * world;

        let lng = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        LatLng::new(lat, lng)
    }

    /// Converts a geographical coordinate to screen pixel coordinates (container relative)
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let origin = self.project(&self.center);
        let projected = self.project(lat_lng);
        Point::new(
            projected.x - origin.x + self.size.x / 2.0,
            projected.y - origin.y + self.size.y / 2.0,
        )
    }

    /// Converts screen pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let origin = self.project(&self.center);
        let projected = Point::new(
            pixel.x - self.size.x / 2.0 + origin.x,
            pixel.y - self.size.y / 2.0 + origin.y,
        );
        self.unproject(&projected)
    }

    /// Pans the viewport by the given pixel offset
    pub fn pan(&mut self, delta: Point) {
        let center_px = Point::new(self.size.x / 2.0, self.size.y / 2.0);
        self.center = self.pixel_to_lat_lng(&center_px.subtract(&delta));
    }

    /// Centers on `bounds` at the largest zoom that keeps them inside the
    /// viewport minus `padding` pixels on each side. A single point keeps the
    /// current zoom.
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: f64) {
        self.center = bounds.center();

        let available = Point::new(
            (self.size.x - 2.0 * padding).max(1.0),
            (self.size.y - 2.0 * padding).max(1.0),
        );

        let at_zero = Viewport::new(self.center, 0.0, self.size);
        let nw = at_zero.project(&LatLng::new(bounds.north_east.lat, bounds.south_west.lng));
        let se = at_zero.project(&LatLng::new(bounds.south_west.lat, bounds.north_east.lng));
        let span = Point::new((se.x - nw.x).abs(), (se.y - nw.y).abs());

        if span.x <= f64::EPSILON && span.y <= f64::EPSILON {
            return;
        }

        let zoom_x = if span.x > f64::EPSILON {
            (available.x / span.x).log2()
        } else {
            MAX_ZOOM
        };
        let zoom_y = if span.y > f64::EPSILON {
            (available.y / span.y).log2()
        } else {
            MAX_ZOOM
        };
        self.set_zoom(zoom_x.min(zoom_y).floor());
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            LatLng::default(),
            crate::constants::DEFAULT_ZOOM,
            Point::new(800.0, 600.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(LatLng::new(42.3601, -71.0589), 25.0, Point::new(800.0, 600.0));
        assert_eq!(viewport.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_center_projects_to_middle() {
        let center = LatLng::new(42.3601, -71.0589);
        let viewport = Viewport::new(center, 12.0, Point::new(800.0, 600.0));
        let pixel = viewport.lat_lng_to_pixel(&center);

        assert!((pixel.x - 400.0).abs() < 1e-6);
        assert!((pixel.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_pixel_round_trip() {
        let viewport = Viewport::new(LatLng::new(42.3601, -71.0589), 13.0, Point::new(800.0, 600.0));
        let target = LatLng::new(42.3736, -71.1097);
        let back = viewport.pixel_to_lat_lng(&viewport.lat_lng_to_pixel(&target));

        assert!((back.lat - target.lat).abs() < 1e-9);
        assert!((back.lng - target.lng).abs() < 1e-9);
    }

    #[test]
    fn test_north_is_up() {
        let viewport = Viewport::default();
        let north = viewport.lat_lng_to_pixel(&LatLng::new(41.0, -74.0060));
        let south = viewport.lat_lng_to_pixel(&LatLng::new(40.0, -74.0060));
        assert!(north.y < south.y);
    }

    #[test]
    fn test_fit_bounds_contains_all_points() {
        let mut viewport = Viewport::default();
        let bounds = LatLngBounds::new(LatLng::new(42.33, -71.12), LatLng::new(42.38, -71.04));
        viewport.fit_bounds(&bounds, 20.0);

        assert_eq!(viewport.center, bounds.center());
        for corner in [bounds.south_west, bounds.north_east] {
            let px = viewport.lat_lng_to_pixel(&corner);
            assert!(px.x >= 0.0 && px.x <= viewport.size.x);
            assert!(px.y >= 0.0 && px.y <= viewport.size.y);
        }
        assert!(viewport.zoom > crate::constants::DEFAULT_ZOOM);
    }

    #[test]
    fn test_fit_single_point_keeps_zoom() {
        let mut viewport = Viewport::default();
        let spot = LatLng::new(42.3601, -71.0589);
        viewport.fit_bounds(&LatLngBounds::new(spot, spot), 20.0);

        assert_eq!(viewport.center, spot);
        assert_eq!(viewport.zoom, crate::constants::DEFAULT_ZOOM);
    }
}
