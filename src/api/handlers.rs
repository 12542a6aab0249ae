use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::io::Cursor;
use std::time::Instant;

use super::models::*;
use crate::batch;
use crate::error::Error;
use crate::projection::CheckedMercator;
use crate::types::{LatLon, Meters, Pixels, TileIndex};

type Rejection = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, Rejection>;

fn reject(error: Error) -> Rejection {
    let status = if error.is_input_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    log::warn!("rejecting request ({}): {}", status, error);

    (status, Json(ErrorResponse { error: error.to_string() }))
}

pub async fn get_resolution(
    State(mercator): State<CheckedMercator>,
    Query(req): Query<ZoomQuery>,
) -> ApiResult<ResolutionResponse> {
    let resolution = mercator.resolution(req.zoom).map_err(reject)?;
    Ok(Json(ResolutionResponse { zoom: req.zoom, resolution }))
}

pub async fn get_zoom(
    State(mercator): State<CheckedMercator>,
    Query(req): Query<ResolutionQuery>,
) -> ApiResult<ResolutionResponse> {
    let zoom = mercator.zoom(req.resolution).map_err(reject)?;
    Ok(Json(ResolutionResponse { zoom, resolution: req.resolution }))
}

pub async fn lat_lon_to_meters(
    State(mercator): State<CheckedMercator>,
    Query(req): Query<LatLonQuery>,
) -> ApiResult<Meters> {
    mercator.lat_lon_to_meters(req.lat, req.lon).map(Json).map_err(reject)
}

pub async fn meters_to_lat_lon(
    State(mercator): State<CheckedMercator>,
    Query(req): Query<PointQuery>,
) -> ApiResult<LatLon> {
    mercator.meters_to_lat_lon(req.x, req.y).map(Json).map_err(reject)
}

pub async fn pixels_to_meters(
    State(mercator): State<CheckedMercator>,
    Query(req): Query<PointZoomQuery>,
) -> ApiResult<Meters> {
    mercator.pixels_to_meters(req.x, req.y, req.zoom).map(Json).map_err(reject)
}

pub async fn meters_to_pixels(
    State(mercator): State<CheckedMercator>,
    Query(req): Query<PointZoomQuery>,
) -> ApiResult<Pixels> {
    mercator.meters_to_pixels(req.x, req.y, req.zoom).map(Json).map_err(reject)
}

pub async fn lat_lon_to_pixels(
    State(mercator): State<CheckedMercator>,
    Query(req): Query<LatLonZoomQuery>,
) -> ApiResult<Pixels> {
    mercator.lat_lon_to_pixels(req.lat, req.lon, req.zoom).map(Json).map_err(reject)
}

pub async fn pixels_to_lat_lon(
    State(mercator): State<CheckedMercator>,
    Query(req): Query<PointZoomQuery>,
) -> ApiResult<LatLon> {
    mercator.pixels_to_lat_lon(req.x, req.y, req.zoom).map(Json).map_err(reject)
}

pub async fn pixels_to_tile(
    State(mercator): State<CheckedMercator>,
    Query(req): Query<PointQuery>,
) -> ApiResult<TileResponse> {
    let (x, y) = mercator.pixels_to_tile(req.x, req.y).map_err(reject)?;
    Ok(Json(TileResponse { x, y }))
}

pub async fn meters_to_tile(
    State(mercator): State<CheckedMercator>,
    Query(req): Query<PointZoomQuery>,
) -> ApiResult<TileBoundsResponse> {
    let tile = mercator.meters_to_tile(req.x, req.y, req.zoom).map_err(reject)?;
    tile_bounds_response(&mercator, tile.zoom, tile.x, tile.y)
}

pub async fn get_tile_bounds(
    State(mercator): State<CheckedMercator>,
    Path((zoom, x, y)): Path<(i32, i64, i64)>,
) -> ApiResult<TileBoundsResponse> {
    log::trace!("tile bounds {}/{}/{}", zoom, x, y);
    tile_bounds_response(&mercator, zoom, x, y)
}

fn tile_bounds_response(
    mercator: &CheckedMercator,
    zoom: i32,
    x: i64,
    y: i64,
) -> ApiResult<TileBoundsResponse> {
    let meters = mercator.tile_bounds(x, y, zoom).map_err(reject)?;
    let lat_lon = mercator.tile_lat_lon_bounds(x, y, zoom).map_err(reject)?;
    let pixels = mercator.tile_pixel_bounds(x, y, zoom).map_err(reject)?;

    Ok(Json(TileBoundsResponse {
        tile: TileIndex::new(x, y, zoom),
        meters,
        lat_lon,
        pixels,
    }))
}

pub async fn upload_csv(
    State(mercator): State<CheckedMercator>,
    Query(req): Query<BatchQuery>,
    mut multipart: Multipart,
) -> Result<Response, Rejection> {
    let start = Instant::now();
    let mut csv_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| reject(Error::InvalidInput(format!("Malformed multipart body: {}", e))))?
    {
        if field.name() == Some("csv") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| reject(Error::InvalidInput(format!("Failed to read CSV: {}", e))))?;
            csv_data = Some(bytes.to_vec());
        }
    }

    let csv_data =
        csv_data.ok_or_else(|| reject(Error::InvalidInput("Missing CSV file".to_string())))?;

    let mut output = Vec::with_capacity(csv_data.len() * 3);
    let stats = batch::convert_csv(&mercator, Cursor::new(csv_data), &mut output, req.zoom)
        .map_err(reject)?;

    let execution_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    log::debug!(
        "batch of {} points at zoom {} took {:.2} ms",
        stats.total,
        req.zoom,
        execution_time_ms
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime::TEXT_CSV.as_ref())
        .header(header::CONTENT_DISPOSITION, "attachment; filename=\"tiles.csv\"")
        .header("x-points-total", stats.total)
        .header("x-points-failed", stats.failed)
        .body(Body::from(output))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to build response: {}", e),
                }),
            )
        })
}
