use crate::error::{Error, Result};
use crate::projection::constants::{MAX_LATITUDE, MAX_ZOOM, ORIGIN_SHIFT};
use crate::projection::mercator::GlobalMercator;
use crate::types::{Bounds, LatLon, Meters, Pixels, TileIndex};

/// Slack allowed past the projected extent, covering the rounding of
/// `lat_lon_to_meters` at [`MAX_LATITUDE`]
const EXTENT_TOLERANCE: f64 = 1e-6;

/// Validating front end for [`GlobalMercator`]
///
/// Every operation checks its arguments and then delegates to the
/// unchecked transformer, so accepted inputs produce bit-identical results.
/// The one adjustment is [`meters_to_tile`](Self::meters_to_tile), which
/// assigns the east and north edges of the extent to the last tile.
#[derive(Debug, Clone, Copy)]
pub struct CheckedMercator {
    mercator: GlobalMercator,
    max_zoom: i32,
}

impl CheckedMercator {
    /// Creates a validating transformer accepting zoom levels up to [`MAX_ZOOM`]
    pub fn new() -> Self {
        Self::with_max_zoom(MAX_ZOOM)
    }

    /// Creates a validating transformer with a custom deepest zoom level
    pub fn with_max_zoom(max_zoom: i32) -> Self {
        Self {
            mercator: GlobalMercator::new(),
            max_zoom: max_zoom.clamp(0, 62),
        }
    }

    /// Returns the unchecked transformer
    pub fn inner(&self) -> &GlobalMercator {
        &self.mercator
    }

    pub fn max_zoom(&self) -> i32 {
        self.max_zoom
    }

    pub fn resolution(&self, zoom: i32) -> Result<f64> {
        self.check_zoom(zoom)?;
        Ok(self.mercator.resolution(zoom))
    }

    /// Zoom level closest to `resolution`, which must land in `0..=max_zoom`
    pub fn zoom(&self, resolution: f64) -> Result<i32> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(Error::InvalidResolution(resolution));
        }
        let zoom = self.mercator.zoom(resolution);
        self.check_zoom(zoom)?;
        Ok(zoom)
    }

    pub fn lat_lon_to_meters(&self, lat: f64, lon: f64) -> Result<Meters> {
        check_lat_lon(lat, lon)?;
        Ok(self.mercator.lat_lon_to_meters(lat, lon))
    }

    pub fn meters_to_lat_lon(&self, mx: f64, my: f64) -> Result<LatLon> {
        check_finite("meters", mx, my)?;
        Ok(self.mercator.meters_to_lat_lon(mx, my))
    }

    pub fn pixels_to_meters(&self, px: f64, py: f64, zoom: i32) -> Result<Meters> {
        check_finite("pixels", px, py)?;
        self.check_zoom(zoom)?;
        Ok(self.mercator.pixels_to_meters(px, py, zoom))
    }

    pub fn meters_to_pixels(&self, mx: f64, my: f64, zoom: i32) -> Result<Pixels> {
        check_finite("meters", mx, my)?;
        self.check_zoom(zoom)?;
        Ok(self.mercator.meters_to_pixels(mx, my, zoom))
    }

    pub fn lat_lon_to_pixels(&self, lat: f64, lon: f64, zoom: i32) -> Result<Pixels> {
        check_lat_lon(lat, lon)?;
        self.check_zoom(zoom)?;
        Ok(self.mercator.lat_lon_to_pixels(lat, lon, zoom))
    }

    pub fn pixels_to_lat_lon(&self, px: f64, py: f64, zoom: i32) -> Result<LatLon> {
        check_finite("pixels", px, py)?;
        self.check_zoom(zoom)?;
        Ok(self.mercator.pixels_to_lat_lon(px, py, zoom))
    }

    pub fn pixels_to_tile(&self, px: f64, py: f64) -> Result<(i64, i64)> {
        check_finite("pixels", px, py)?;
        Ok(self.mercator.pixels_to_tile(px, py))
    }

    /// Tile covering a Mercator point inside the projected extent
    ///
    /// The extent is closed: a point on its east or north edge maps to the
    /// last tile rather than to the nonexistent tile `2^zoom`. Points beyond
    /// the extent are rejected.
    pub fn meters_to_tile(&self, mx: f64, my: f64, zoom: i32) -> Result<TileIndex> {
        check_finite("meters", mx, my)?;
        self.check_zoom(zoom)?;

        let tile = self.mercator.meters_to_tile(mx, my, zoom);
        let limit = ORIGIN_SHIFT + EXTENT_TOLERANCE;
        if mx.abs() > limit || my.abs() > limit {
            return Err(Error::TileOutOfRange { x: tile.x, y: tile.y, zoom });
        }

        let last = tile.tiles_per_axis() - 1;
        Ok(TileIndex::new(tile.x.clamp(0, last), tile.y.clamp(0, last), zoom))
    }

    /// Tile covering a lat/lon point
    pub fn lat_lon_to_tile(&self, lat: f64, lon: f64, zoom: i32) -> Result<TileIndex> {
        let meters = self.lat_lon_to_meters(lat, lon)?;
        self.meters_to_tile(meters.x, meters.y, zoom)
    }

    pub fn tile_bounds(&self, tx: i64, ty: i64, zoom: i32) -> Result<Bounds> {
        self.check_tile(tx, ty, zoom)?;
        Ok(self.mercator.tile_bounds(tx, ty, zoom))
    }

    pub fn tile_lat_lon_bounds(&self, tx: i64, ty: i64, zoom: i32) -> Result<Bounds> {
        self.check_tile(tx, ty, zoom)?;
        Ok(self.mercator.tile_lat_lon_bounds(tx, ty, zoom))
    }

    pub fn tile_pixel_bounds(&self, tx: i64, ty: i64, zoom: i32) -> Result<Bounds> {
        self.check_tile(tx, ty, zoom)?;
        Ok(self.mercator.tile_pixel_bounds(tx, ty, zoom))
    }

    pub fn tile_pixel_bounds_at(
        &self,
        tx: i64,
        ty: i64,
        zoom: i32,
        target_zoom: i32,
    ) -> Result<Bounds> {
        self.check_tile(tx, ty, zoom)?;
        self.check_zoom(target_zoom)?;
        Ok(self.mercator.tile_pixel_bounds_at(tx, ty, zoom, target_zoom))
    }

    /// Fails with [`Error::InvalidZoom`] unless `zoom` is in `0..=max_zoom`
    pub fn check_zoom(&self, zoom: i32) -> Result<()> {
        if (0..=self.max_zoom).contains(&zoom) {
            Ok(())
        } else {
            Err(Error::InvalidZoom(zoom))
        }
    }

    fn check_tile(&self, tx: i64, ty: i64, zoom: i32) -> Result<()> {
        self.check_zoom(zoom)?;
        let tiles = TileIndex::new(tx, ty, zoom).tiles_per_axis();
        if (0..tiles).contains(&tx) && (0..tiles).contains(&ty) {
            Ok(())
        } else {
            Err(Error::TileOutOfRange { x: tx, y: ty, zoom })
        }
    }
}

impl Default for CheckedMercator {
    fn default() -> Self {
        Self::new()
    }
}

fn check_lat_lon(lat: f64, lon: f64) -> Result<()> {
    check_finite("lat/lon", lat, lon)?;
    if lat.abs() > MAX_LATITUDE {
        return Err(Error::InvalidLatitude(lat));
    }
    if lon.abs() > 180.0 {
        return Err(Error::InvalidLongitude(lon));
    }
    Ok(())
}

fn check_finite(what: &str, a: f64, b: f64) -> Result<()> {
    if a.is_finite() && b.is_finite() {
        Ok(())
    } else {
        Err(Error::NonFinite(format!("{} ({}, {})", what, a, b)))
    }
}
