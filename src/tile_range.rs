//! Tile ranges covering a Mercator bounding box

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::projection::{CheckedMercator, TILE_SIZE};
use crate::types::{Bounds, TileIndex};

const TILE_SIZE_F64: f64 = TILE_SIZE as f64;

/// Inclusive rectangle of TMS tiles at one zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileRange {
    pub zoom: i32,
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

/// Fraction of a tile within which a corner is snapped onto the tile border
///
/// Tile bounds do not round-trip exactly through meters, so the corners of
/// a tile's own bounds land a few ulps either side of the border.
const BORDER_SNAP: f64 = 1e-6;

impl TileRange {
    /// Tiles intersecting `bounds` (meters) at `zoom`, clipped to the pyramid
    ///
    /// Tiles are half-open, so a tile that only touches the bounds along its
    /// west or south edge is not included.
    pub fn covering(mercator: &CheckedMercator, bounds: Bounds, zoom: i32) -> Result<Self> {
        if bounds.min_x > bounds.max_x || bounds.min_y > bounds.max_y {
            return Err(Error::InvalidInput(format!("Inverted bounds: {}", bounds)));
        }

        let min = mercator.meters_to_pixels(bounds.min_x, bounds.min_y, zoom)?;
        let max = mercator.meters_to_pixels(bounds.max_x, bounds.max_y, zoom)?;
        let last = TileIndex::new(0, 0, zoom).tiles_per_axis() - 1;

        let min_x = first_tile(min.x);
        let min_y = first_tile(min.y);
        let max_x = last_tile(max.x).max(min_x);
        let max_y = last_tile(max.y).max(min_y);

        Ok(Self {
            zoom,
            min_x: min_x.clamp(0, last),
            min_y: min_y.clamp(0, last),
            max_x: max_x.clamp(0, last),
            max_y: max_y.clamp(0, last),
        })
    }

    /// The whole pyramid level
    pub fn full(mercator: &CheckedMercator, zoom: i32) -> Result<Self> {
        mercator.check_zoom(zoom)?;
        let last = TileIndex::new(0, 0, zoom).tiles_per_axis() - 1;
        Ok(Self { zoom, min_x: 0, min_y: 0, max_x: last, max_y: last })
    }

    pub fn width(&self) -> u64 {
        (self.max_x - self.min_x + 1).max(0) as u64
    }

    pub fn height(&self) -> u64 {
        (self.max_y - self.min_y + 1).max(0) as u64
    }

    /// Number of tiles in the range, `None` when it does not fit in a `u64`
    pub fn count(&self) -> Option<u64> {
        self.width().checked_mul(self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, tile: &TileIndex) -> bool {
        tile.zoom == self.zoom
            && (self.min_x..=self.max_x).contains(&tile.x)
            && (self.min_y..=self.max_y).contains(&tile.y)
    }

    /// Iterates row by row, bottom row first
    pub fn iter(&self) -> impl Iterator<Item = TileIndex> {
        let range = *self;
        (range.min_y..=range.max_y).flat_map(move |y| {
            (range.min_x..=range.max_x).map(move |x| TileIndex::new(x, y, range.zoom))
        })
    }

    /// Meter bounds of every tile in the range, computed in parallel
    pub fn bounds(&self, mercator: &CheckedMercator) -> Result<Vec<(TileIndex, Bounds)>> {
        let tiles: Vec<TileIndex> = self.iter().collect();
        log::debug!("computing bounds for {} tiles at zoom {}", tiles.len(), self.zoom);

        tiles
            .par_iter()
            .map(|tile| -> Result<(TileIndex, Bounds)> {
                let bounds = mercator.tile_bounds(tile.x, tile.y, tile.zoom)?;
                Ok((*tile, bounds))
            })
            .collect()
    }
}

/// Tile holding the lower corner pixel coordinate
fn first_tile(pixel: f64) -> i64 {
    (pixel / TILE_SIZE_F64 + BORDER_SNAP).floor() as i64
}

/// Last tile reached by the upper corner pixel coordinate
fn last_tile(pixel: f64) -> i64 {
    (pixel / TILE_SIZE_F64 - BORDER_SNAP).ceil() as i64 - 1
}
