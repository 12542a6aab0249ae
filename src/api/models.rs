use serde::{Deserialize, Serialize};

use crate::types::{Bounds, TileIndex};

#[derive(Debug, Serialize, Deserialize)]
pub struct ZoomQuery {
    pub zoom: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResolutionQuery {
    pub resolution: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LatLonQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LatLonZoomQuery {
    pub lat: f64,
    pub lon: f64,
    pub zoom: i32,
}

/// Meters or pixels, depending on the route
#[derive(Debug, Serialize, Deserialize)]
pub struct PointQuery {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointZoomQuery {
    pub x: f64,
    pub y: f64,
    pub zoom: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchQuery {
    pub zoom: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResolutionResponse {
    pub zoom: i32,
    pub resolution: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TileResponse {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Serialize)]
pub struct TileBoundsResponse {
    pub tile: TileIndex,
    pub meters: Bounds,
    pub lat_lon: Bounds,
    pub pixels: Bounds,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
