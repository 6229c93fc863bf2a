/// In-process map surface
///
/// Holds the camera (center + zoom), the container size, the placed
/// markers and an optional pan animation. The map canvas draws from it;
/// controllers mutate it through `MapSurface`.
use cgmath::Vector2;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::projection::{from_world, to_world};
use super::{LatLng, MapSurface, MarkerHandle, MarkerIcon, ScreenPoint};

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Marker circle radius in pixels (30 px icon)
pub const MARKER_RADIUS: f64 = 15.0;

/// Duration of an animated pan
pub const PAN_DURATION: Duration = Duration::from_millis(500);

/// A marker as currently placed on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedMarker {
    pub position: LatLng,
    pub icon: MarkerIcon,
}

#[derive(Debug, Clone, Copy)]
struct PanAnimation {
    from: LatLng,
    to: LatLng,
    /// Set by the first tick so the animation starts when frames do
    started: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct Viewport {
    center: LatLng,
    zoom: f64,
    size: Vector2<f64>,
    markers: BTreeMap<MarkerHandle, PlacedMarker>,
    next_handle: u64,
    animation: Option<PanAnimation>,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size: Vector2::new(1024.0, 768.0),
            markers: BTreeMap::new(),
            next_handle: 0,
            animation: None,
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn size(&self) -> (f64, f64) {
        (self.size.x, self.size.y)
    }

    /// Track the container size reported by the canvas
    pub fn set_size(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.size = Vector2::new(width, height);
        }
    }

    /// This viewport as seen in a container of the given size. Borrowed
    /// when the size already matches (or is degenerate).
    pub fn fitted(&self, width: f64, height: f64) -> Cow<'_, Self> {
        if width <= 0.0 || height <= 0.0 || (width, height) == self.size() {
            return Cow::Borrowed(self);
        }
        let mut fitted = self.clone();
        fitted.set_size(width, height);
        Cow::Owned(fitted)
    }

    /// Markers in placement order
    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, &PlacedMarker)> {
        self.markers.iter().map(|(handle, marker)| (*handle, marker))
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&PlacedMarker> {
        self.markers.get(&handle)
    }

    /// Topmost marker under a container point
    pub fn marker_at(&self, point: ScreenPoint) -> Option<MarkerHandle> {
        self.markers
            .iter()
            .rev()
            .find(|(_, marker)| {
                let at = self.project(marker.position);
                let (dx, dy) = (at.x - point.x, at.y - point.y);
                dx * dx + dy * dy <= MARKER_RADIUS * MARKER_RADIUS
            })
            .map(|(handle, _)| *handle)
    }

    /// Destination of the running pan, if any
    pub fn pan_target(&self) -> Option<LatLng> {
        self.animation.map(|animation| animation.to)
    }

    pub fn is_animating(&self) -> bool {
        self.pan_target().is_some()
    }

    /// Advance the pan animation. Returns true while it is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        let started = *animation.started.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started);
        let t = (elapsed.as_secs_f64() / PAN_DURATION.as_secs_f64()).min(1.0);
        let eased = 1.0 - (1.0 - t).powi(3);

        let from = to_world(animation.from, self.zoom);
        let to = to_world(animation.to, self.zoom);
        self.center = from_world(from + (to - from) * eased, self.zoom);

        if t >= 1.0 {
            self.center = animation.to;
            self.animation = None;
        }
        self.animation.is_some()
    }

    /// Drag the map by a pixel delta; cancels any running pan
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.animation = None;
        let world = to_world(self.center, self.zoom) - Vector2::new(dx, dy);
        self.center = from_world(world, self.zoom);
    }

    /// Change zoom keeping the geo point under `anchor` fixed
    pub fn zoom_by(&mut self, delta: f64, anchor: ScreenPoint) {
        let zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        if zoom == self.zoom {
            return;
        }

        let pinned = self.unproject(anchor);
        self.zoom = zoom;
        let offset = Vector2::new(anchor.x, anchor.y) - self.size / 2.0;
        self.center = from_world(to_world(pinned, zoom) - offset, zoom);
    }
}

impl MapSurface for Viewport {
    fn add_marker(&mut self, at: LatLng, icon: MarkerIcon) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        self.markers.insert(handle, PlacedMarker { position: at, icon });
        handle
    }

    fn set_icon(&mut self, marker: MarkerHandle, icon: MarkerIcon) {
        if let Some(placed) = self.markers.get_mut(&marker) {
            placed.icon = icon;
        }
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.markers.remove(&marker);
    }

    fn pan_to(&mut self, center: LatLng, animate: bool) {
        if animate {
            self.animation = Some(PanAnimation {
                from: self.center,
                to: center,
                started: None,
            });
        } else {
            self.animation = None;
            self.center = center;
        }
    }

    fn project(&self, at: LatLng) -> ScreenPoint {
        let point = to_world(at, self.zoom) - to_world(self.center, self.zoom) + self.size / 2.0;
        ScreenPoint::new(point.x, point.y)
    }

    fn unproject(&self, point: ScreenPoint) -> LatLng {
        let world = Vector2::new(point.x, point.y) - self.size / 2.0 + to_world(self.center, self.zoom);
        from_world(world, self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ST_LOUIS: LatLng = LatLng::new(38.6270, -90.1994);

    #[test]
    fn test_center_projects_to_middle() {
        let mut viewport = Viewport::new(ST_LOUIS, 12.0);
        viewport.set_size(800.0, 600.0);

        let middle = viewport.project(ST_LOUIS);
        assert!((middle.x - 400.0).abs() < 1e-6);
        assert!((middle.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let viewport = Viewport::new(ST_LOUIS, 14.0);
        let somewhere = LatLng::new(38.64, -90.25);
        let back = viewport.unproject(viewport.project(somewhere));
        assert!((back.lat - somewhere.lat).abs() < 1e-9);
        assert!((back.lng - somewhere.lng).abs() < 1e-9);
    }

    #[test]
    fn test_fitted_uses_container_size() {
        let mut viewport = Viewport::new(ST_LOUIS, 12.0);
        viewport.set_size(800.0, 600.0);
        let handle = viewport.add_marker(ST_LOUIS, MarkerIcon::INACTIVE);

        assert!(matches!(viewport.fitted(800.0, 600.0), Cow::Borrowed(_)));
        assert!(matches!(viewport.fitted(0.0, 600.0), Cow::Borrowed(_)));

        let fitted = viewport.fitted(1200.0, 500.0);
        assert!(matches!(fitted, Cow::Owned(_)));
        assert_eq!(fitted.size(), (1200.0, 500.0));
        assert_eq!(fitted.center(), ST_LOUIS);
        assert_eq!(fitted.marker_at(ScreenPoint::new(600.0, 250.0)), Some(handle));
        assert_eq!(viewport.marker_at(ScreenPoint::new(600.0, 250.0)), None);
    }

    #[test]
    fn test_marker_hit_test_prefers_topmost() {
        let mut viewport = Viewport::new(ST_LOUIS, 12.0);
        let below = viewport.add_marker(ST_LOUIS, MarkerIcon::INACTIVE);
        let above = viewport.add_marker(ST_LOUIS, MarkerIcon::INACTIVE);

        let at = viewport.project(ST_LOUIS);
        assert_eq!(viewport.marker_at(at), Some(above));

        viewport.remove_marker(above);
        assert_eq!(viewport.marker_at(at), Some(below));
        assert_eq!(viewport.marker_at(ScreenPoint::new(at.x + 40.0, at.y)), None);
    }

    #[test]
    fn test_animated_pan_finishes_at_target() {
        let mut viewport = Viewport::new(ST_LOUIS, 12.0);
        let target = LatLng::new(38.70, -90.10);
        viewport.pan_to(target, true);

        // Nothing moves until frames arrive
        assert_eq!(viewport.center(), ST_LOUIS);

        let start = Instant::now();
        assert!(viewport.tick(start));
        assert!(viewport.tick(start + Duration::from_millis(250)));
        let halfway = viewport.center();
        assert!(halfway.lng > ST_LOUIS.lng && halfway.lng < target.lng);

        assert!(!viewport.tick(start + PAN_DURATION));
        assert_eq!(viewport.center(), target);
        assert!(!viewport.is_animating());
    }

    #[test]
    fn test_new_pan_supersedes_running_one() {
        let mut viewport = Viewport::new(ST_LOUIS, 12.0);
        let start = Instant::now();

        viewport.pan_to(LatLng::new(38.70, -90.10), true);
        viewport.tick(start);
        viewport.tick(start + Duration::from_millis(100));

        let second = LatLng::new(38.55, -90.30);
        viewport.pan_to(second, true);
        assert_eq!(viewport.pan_target(), Some(second));

        let later = start + Duration::from_millis(200);
        viewport.tick(later);
        viewport.tick(later + PAN_DURATION);
        assert_eq!(viewport.center(), second);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut viewport = Viewport::new(ST_LOUIS, 12.0);
        let anchor = ScreenPoint::new(100.0, 200.0);
        let pinned = viewport.unproject(anchor);

        viewport.zoom_by(1.0, anchor);
        assert_eq!(viewport.zoom(), 13.0);

        let after = viewport.project(pinned);
        assert!((after.x - anchor.x).abs() < 1e-6);
        assert!((after.y - anchor.y).abs() < 1e-6);

        viewport.zoom_by(100.0, anchor);
        assert_eq!(viewport.zoom(), MAX_ZOOM);
    }
}
