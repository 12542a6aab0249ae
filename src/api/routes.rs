use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower::ServiceBuilder;
use axum::extract::DefaultBodyLimit;

use super::handlers::*;
use super::ServerConfig;
use crate::projection::CheckedMercator;

pub fn create_router(config: &ServerConfig) -> Router {
    let mercator = CheckedMercator::with_max_zoom(config.max_zoom);

    Router::new()
        .route("/api/resolution", get(get_resolution))
        .route("/api/zoom", get(get_zoom))
        .route("/api/latlon/meters", get(lat_lon_to_meters))
        .route("/api/meters/latlon", get(meters_to_lat_lon))
        .route("/api/pixels/meters", get(pixels_to_meters))
        .route("/api/meters/pixels", get(meters_to_pixels))
        .route("/api/latlon/pixels", get(lat_lon_to_pixels))
        .route("/api/pixels/latlon", get(pixels_to_lat_lon))
        .route("/api/pixels/tile", get(pixels_to_tile))
        .route("/api/meters/tile", get(meters_to_tile))
        .route("/api/tile/:zoom/:x/:y", get(get_tile_bounds))
        .route("/api/batch", post(upload_csv))
        .with_state(mercator)
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(config.max_body_bytes))
                .layer(CorsLayer::permissive())
        )
}
