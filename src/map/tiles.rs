/// Slippy-map tile addressing
///
/// Tiles come from the integer zoom at or below the camera zoom and are
/// stretched to cover fractional zooms.
use super::projection::{to_world, TILE_SIZE};
use super::viewport::{Viewport, MAX_ZOOM};

/// Tile address in the `{z}/{x}/{y}` scheme used by OpenStreetMap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoords {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl TileCoords {
    /// Fill the `{z}`, `{x}` and `{y}` placeholders of a URL template
    pub fn url(&self, template: &str) -> String {
        template
            .replace("{z}", &self.z.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }
}

/// A tile and the square it covers in container pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub coords: TileCoords,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Tiles overlapping the viewport, row by row from the top left
pub fn visible_tiles(viewport: &Viewport) -> Vec<PlacedTile> {
    let zoom = viewport.zoom();
    let z = zoom.floor().clamp(0.0, MAX_ZOOM) as u32;
    let last_index = (1i64 << z) - 1;
    let tile = TILE_SIZE * 2f64.powf(zoom - z as f64);

    let (width, height) = viewport.size();
    let center = to_world(viewport.center(), zoom);
    let left = center.x - width / 2.0;
    let top = center.y - height / 2.0;

    let span = |start: f64, extent: f64| {
        let first = ((start / tile).floor() as i64).max(0);
        let last = (((start + extent) / tile).ceil() as i64 - 1).min(last_index);
        first..=last
    };

    let mut tiles = Vec::new();
    for ty in span(top, height) {
        for tx in span(left, width) {
            tiles.push(PlacedTile {
                coords: TileCoords {
                    x: tx as u32,
                    y: ty as u32,
                    z,
                },
                x: tx as f64 * tile - left,
                y: ty as f64 * tile - top,
                size: tile,
            });
        }
    }
    tiles
}
