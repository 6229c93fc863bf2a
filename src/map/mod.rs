/// Map rendering seam
///
/// Controllers talk to the map only through `MapSurface`: place a marker,
/// restyle it, remove it, pan, and convert between screen and geo space.
///
/// Architecture:
/// - `projection.rs` - Web Mercator math
/// - `viewport.rs` - in-process `MapSurface` drawn by the map canvas
/// - `tiles.rs` - which base map tiles cover the viewport

pub mod projection;
pub mod tiles;
pub mod viewport;

pub use viewport::Viewport;

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Point in map-container pixels (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Opaque handle to a marker placed on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub u64);

/// Visual state of a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerIcon {
    pub active: bool,
    /// Badge shown on the marker; only the active marker carries one
    pub count: Option<usize>,
}

impl MarkerIcon {
    pub const INACTIVE: MarkerIcon = MarkerIcon {
        active: false,
        count: None,
    };

    pub fn active(count: usize) -> Self {
        MarkerIcon {
            active: true,
            count: Some(count),
        }
    }
}

/// Capabilities the application needs from a map renderer
pub trait MapSurface {
    fn add_marker(&mut self, at: LatLng, icon: MarkerIcon) -> MarkerHandle;

    fn set_icon(&mut self, marker: MarkerHandle, icon: MarkerIcon);

    fn remove_marker(&mut self, marker: MarkerHandle);

    /// Start moving the view towards `center`. Returns immediately;
    /// a later call supersedes an unfinished one.
    fn pan_to(&mut self, center: LatLng, animate: bool);

    fn project(&self, at: LatLng) -> ScreenPoint;

    fn unproject(&self, point: ScreenPoint) -> LatLng;
}
