//! Spherical Mercator projection and tile pyramid math

pub mod constants;
pub mod mercator;
pub mod checked;
#[cfg(feature = "proj")]
pub mod reference;

pub use constants::{
    epsg, EARTH_RADIUS, INITIAL_RESOLUTION, MAX_LATITUDE, MAX_ZOOM, ORIGIN_SHIFT, TILE_SIZE,
};
pub use mercator::GlobalMercator;
pub use checked::CheckedMercator;
#[cfg(feature = "proj")]
pub use reference::ProjReference;
