//! TMS Global Mercator profile (EPSG:900913 / EPSG:3857)
//!
//! Conversions between the four coordinate spaces of the tile pyramid:
//!
//! ```text
//!   LatLon  <->  Meters  <->  Pixels  <->  Tile
//!   WGS84        EPSG:900913  XY at zoom   TMS XYZ
//! ```
//!
//! Pixel and tile coordinates use TMS notation with the origin in the
//! bottom-left corner. No input is validated here: out-of-range values
//! flow through the formulas and may produce infinities or NaN. See
//! [`CheckedMercator`](super::CheckedMercator) for a validating front end.

use std::f64::consts::PI;

use super::constants::{INITIAL_RESOLUTION, ORIGIN_SHIFT, TILE_SIZE};
use crate::types::{Bounds, LatLon, Meters, Pixels, TileIndex};

const TILE_SIZE_F64: f64 = TILE_SIZE as f64;

/// Coordinate transformer for the global Spherical Mercator tile pyramid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalMercator;

impl GlobalMercator {
    /// Creates a new transformer
    pub const fn new() -> Self {
        GlobalMercator
    }

    /// Tile edge length in pixels
    pub const fn tile_size(&self) -> u32 {
        TILE_SIZE
    }

    /// Resolution in meters per pixel at the equator for the given zoom level
    pub fn resolution(&self, zoom: i32) -> f64 {
        INITIAL_RESOLUTION / 2f64.powi(zoom)
    }

    /// Zoom level whose resolution is closest to the given one
    ///
    /// Rounds half away from zero. NaN input yields 0.
    pub fn zoom(&self, resolution: f64) -> i32 {
        (INITIAL_RESOLUTION / resolution).log2().round() as i32
    }

    /// Converts WGS84 lat/lon to Spherical Mercator meters
    pub fn lat_lon_to_meters(&self, lat: f64, lon: f64) -> Meters {
        let mx = lon * ORIGIN_SHIFT / 180.0;
        let my = ((90.0 + lat) * PI / 360.0).tan().ln() / (PI / 180.0);
        let my = my * ORIGIN_SHIFT / 180.0;
        Meters::new(mx, my)
    }

    /// Converts Spherical Mercator meters to WGS84 lat/lon
    pub fn meters_to_lat_lon(&self, mx: f64, my: f64) -> LatLon {
        let lon = (mx / ORIGIN_SHIFT) * 180.0;
        let lat = (my / ORIGIN_SHIFT) * 180.0;
        let lat = 180.0 / PI * (2.0 * (lat * PI / 180.0).exp().atan() - PI / 2.0);
        LatLon::new(lat, lon)
    }

    /// Converts pixel coordinates at the given zoom level to meters
    pub fn pixels_to_meters(&self, px: f64, py: f64, zoom: i32) -> Meters {
        let res = self.resolution(zoom);
        Meters::new(px * res - ORIGIN_SHIFT, py * res - ORIGIN_SHIFT)
    }

    /// Converts meters to pixel coordinates at the given zoom level
    pub fn meters_to_pixels(&self, mx: f64, my: f64, zoom: i32) -> Pixels {
        let res = self.resolution(zoom);
        Pixels::new((mx + ORIGIN_SHIFT) / res, (my + ORIGIN_SHIFT) / res)
    }

    pub fn lat_lon_to_pixels(&self, lat: f64, lon: f64, zoom: i32) -> Pixels {
        let meters = self.lat_lon_to_meters(lat, lon);
        self.meters_to_pixels(meters.x, meters.y, zoom)
    }

    pub fn pixels_to_lat_lon(&self, px: f64, py: f64, zoom: i32) -> LatLon {
        let meters = self.pixels_to_meters(px, py, zoom);
        self.meters_to_lat_lon(meters.x, meters.y)
    }

    /// Returns the (column, row) of the tile covering the given pixel
    ///
    /// Zoom independent: the pixel coordinates already belong to one level.
    pub fn pixels_to_tile(&self, px: f64, py: f64) -> (i64, i64) {
        (
            (px / TILE_SIZE_F64).floor() as i64,
            (py / TILE_SIZE_F64).floor() as i64,
        )
    }

    /// Returns the tile covering the given Mercator point
    pub fn meters_to_tile(&self, mx: f64, my: f64, zoom: i32) -> TileIndex {
        let pixels = self.meters_to_pixels(mx, my, zoom);
        let (tx, ty) = self.pixels_to_tile(pixels.x, pixels.y);
        TileIndex::new(tx, ty, zoom)
    }

    /// Bounds of a tile in meters
    pub fn tile_bounds(&self, tx: i64, ty: i64, zoom: i32) -> Bounds {
        let (tx, ty) = (tx as f64, ty as f64);
        let min = self.pixels_to_meters(tx * TILE_SIZE_F64, ty * TILE_SIZE_F64, zoom);
        let max = self.pixels_to_meters(
            (tx + 1.0) * TILE_SIZE_F64,
            (ty + 1.0) * TILE_SIZE_F64,
            zoom,
        );
        Bounds::new(min.x, min.y, max.x, max.y)
    }

    /// Bounds of a tile in WGS84 degrees, longitude on x and latitude on y
    pub fn tile_lat_lon_bounds(&self, tx: i64, ty: i64, zoom: i32) -> Bounds {
        let bounds = self.tile_bounds(tx, ty, zoom);
        let min = self.meters_to_lat_lon(bounds.min_x, bounds.min_y);
        let max = self.meters_to_lat_lon(bounds.max_x, bounds.max_y);
        Bounds::new(min.lon, min.lat, max.lon, max.lat)
    }

    /// Bounds of a tile in pixel coordinates of its own zoom level
    pub fn tile_pixel_bounds(&self, tx: i64, ty: i64, zoom: i32) -> Bounds {
        self.tile_pixel_bounds_at(tx, ty, zoom, zoom)
    }

    /// Bounds of a tile projected into the pixel space of `target_zoom`
    pub fn tile_pixel_bounds_at(&self, tx: i64, ty: i64, zoom: i32, target_zoom: i32) -> Bounds {
        let bounds = self.tile_bounds(tx, ty, zoom);
        let min = self.meters_to_pixels(bounds.min_x, bounds.min_y, target_zoom);
        let max = self.meters_to_pixels(bounds.max_x, bounds.max_y, target_zoom);
        Bounds::new(min.x, min.y, max.x, max.y)
    }
}
