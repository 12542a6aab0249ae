//! Fixed constants of the global Spherical Mercator tile pyramid

use std::f64::consts::PI;

/// Tile edge length in pixels
pub const TILE_SIZE: u32 = 256;

/// Sphere radius in meters (WGS84 semi-major axis)
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Half of the Earth's circumference in meters; the extent of the
/// projected world is `[-ORIGIN_SHIFT, ORIGIN_SHIFT]` on both axes
pub const ORIGIN_SHIFT: f64 = PI * EARTH_RADIUS;

/// Ground resolution at zoom 0 in meters per pixel
pub const INITIAL_RESOLUTION: f64 = 2.0 * PI * EARTH_RADIUS / TILE_SIZE as f64;

/// Latitude at which the projected world becomes square, `atan(sinh(π))`
pub const MAX_LATITUDE: f64 = 85.0511287798066;

/// Deepest zoom level accepted by the validating layer
pub const MAX_ZOOM: i32 = 30;

/// Well-known EPSG codes
pub mod epsg {
    pub const WGS84: u32 = 4326;
    pub const WEB_MERCATOR: u32 = 3857;
    /// Legacy code for the same projection
    pub const GOOGLE_MERCATOR: u32 = 900913;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_shift() {
        assert_eq!(ORIGIN_SHIFT, 20037508.342789244);
        assert_eq!(ORIGIN_SHIFT, 2.0 * PI * EARTH_RADIUS / 2.0);
    }

    #[test]
    fn test_initial_resolution() {
        assert!((INITIAL_RESOLUTION - 156543.03392804062).abs() < 1e-6);
        assert!((INITIAL_RESOLUTION - ORIGIN_SHIFT * 2.0 / 256.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_latitude() {
        let expected = PI.sinh().atan().to_degrees();
        assert!((MAX_LATITUDE - expected).abs() < 1e-12);
    }
}
