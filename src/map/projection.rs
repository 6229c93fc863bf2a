/// Web Mercator (EPSG:3857) projection in world-pixel space
///
/// At zoom `z` the world is a square of `TILE_SIZE * 2^z` pixels with
/// (0, 0) at 180°W / ~85.05°N.
use cgmath::Vector2;
use std::f64::consts::PI;

use super::LatLng;

/// Edge length of one map tile in pixels
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Mercator world
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// World size in pixels at a (possibly fractional) zoom
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Geo coordinate to world pixels
pub fn to_world(at: LatLng, zoom: f64) -> Vector2<f64> {
    let size = world_size(zoom);
    let lat = at.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

    let x = (at.lng + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    Vector2::new(x, y)
}

/// World pixels back to a geo coordinate
pub fn from_world(point: Vector2<f64>, zoom: f64) -> LatLng {
    let size = world_size(zoom);

    let lng = point.x / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * point.y / size);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: LatLng, b: LatLng) {
        assert!((a.lat - b.lat).abs() < 1e-9, "{:?} vs {:?}", a, b);
        assert!((a.lng - b.lng).abs() < 1e-9, "{:?} vs {:?}", a, b);
    }

    #[test]
    fn test_origin_maps_to_world_center() {
        let center = to_world(LatLng::new(0.0, 0.0), 0.0);
        assert!((center.x - 128.0).abs() < 1e-9);
        assert!((center.y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverse() {
        for zoom in [1.0, 12.0, 18.5] {
            let st_louis = LatLng::new(38.6270, -90.1994);
            assert_close(from_world(to_world(st_louis, zoom), zoom), st_louis);
        }
    }

    #[test]
    fn test_poles_are_clamped() {
        let top = to_world(LatLng::new(90.0, 0.0), 2.0);
        assert!(top.y.is_finite());
        assert!(top.y.abs() < 1e-6);
    }
}
