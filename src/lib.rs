//! mercator-tiles - Coordinate math for global Spherical Mercator tile pyramids
//!
//! Converts between WGS84 lat/lon, Spherical Mercator meters (EPSG:900913),
//! pixel coordinates at a pyramid zoom level and TMS tile indices, and
//! derives the bounds covered by a tile in each of those spaces.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use mercator_tiles::GlobalMercator;
//!
//! let mercator = GlobalMercator::new();
//!
//! let meters = mercator.lat_lon_to_meters(53.5461, -113.4938);
//! let tile = mercator.meters_to_tile(meters.x, meters.y, 10);
//! let bounds = mercator.tile_bounds(tile.x, tile.y, tile.zoom);
//!
//! assert!(bounds.min_x <= meters.x && meters.x < bounds.max_x);
//! ```
//!
//! ## Validated Input
//!
//! ```
//! use mercator_tiles::{CheckedMercator, Error};
//!
//! let mercator = CheckedMercator::new();
//!
//! let pixels = mercator.lat_lon_to_pixels(43.6532, -79.3832, 12)?;
//! println!("Pixel: ({:.2}, {:.2})", pixels.x, pixels.y);
//!
//! assert!(matches!(
//!     mercator.lat_lon_to_meters(90.0, 0.0),
//!     Err(Error::InvalidLatitude(_))
//! ));
//! # Ok::<(), mercator_tiles::Error>(())
//! ```

pub mod error;
pub mod types;
pub mod projection;
pub mod tile_range;
pub mod batch;
pub mod api;

pub use error::{Error, Result};
pub use types::{Bounds, LatLon, Meters, Pixels, TileIndex};
pub use projection::{
    epsg, CheckedMercator, GlobalMercator, EARTH_RADIUS, INITIAL_RESOLUTION, MAX_LATITUDE,
    MAX_ZOOM, ORIGIN_SHIFT, TILE_SIZE,
};
#[cfg(feature = "proj")]
pub use projection::ProjReference;
pub use tile_range::TileRange;
pub use batch::{BatchStats, PointConversion, PointRecord};
