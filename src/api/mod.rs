//! HTTP interface exposing the conversions as JSON endpoints

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::create_router;

use crate::projection::MAX_ZOOM;

/// Runtime configuration of the API server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind: String,
    /// Upload size limit for batch requests
    pub max_body_bytes: usize,
    /// Deepest zoom level accepted by the endpoints
    pub max_zoom: i32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            max_body_bytes: 100 * 1024 * 1024,
            max_zoom: MAX_ZOOM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        create_router(&ServerConfig::default())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_resolution_endpoint() {
        let (status, json) = get_json("/api/resolution?zoom=0").await;
        assert_eq!(status, StatusCode::OK);
        assert!((json["resolution"].as_f64().unwrap() - 156543.03392804062).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_zoom_endpoint() {
        let (status, json) = get_json("/api/zoom?resolution=9783.93962050254").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["zoom"], 4);
    }

    #[tokio::test]
    async fn test_lat_lon_to_meters_endpoint() {
        let (status, json) = get_json("/api/latlon/meters?lat=0&lon=180").await;
        assert_eq!(status, StatusCode::OK);
        assert!((json["x"].as_f64().unwrap() - 20037508.342789244).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_invalid_latitude_is_bad_request() {
        let (status, json) = get_json("/api/latlon/meters?lat=90&lon=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("latitude"));
    }

    #[tokio::test]
    async fn test_pixels_to_tile_endpoint() {
        let (status, json) = get_json("/api/pixels/tile?x=256&y=255").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["x"], 1);
        assert_eq!(json["y"], 0);
    }

    #[tokio::test]
    async fn test_tile_bounds_endpoint() {
        let (status, json) = get_json("/api/tile/0/0/0").await;
        assert_eq!(status, StatusCode::OK);
        assert!((json["meters"]["max_x"].as_f64().unwrap() - 20037508.342789244).abs() < 1e-3);
        assert!((json["pixels"]["max_y"].as_f64().unwrap() - 256.0).abs() < 1e-6);
        assert_eq!(json["tile"]["zoom"], 0);
    }

    #[tokio::test]
    async fn test_meters_to_tile_on_east_edge() {
        let (status, json) = get_json("/api/meters/tile?x=20037508.342789244&y=0&zoom=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["tile"]["x"], 3);
        assert_eq!(json["tile"]["y"], 2);
    }

    #[tokio::test]
    async fn test_zoom_beyond_deepest_level_is_bad_request() {
        let (status, json) = get_json("/api/zoom?resolution=1e-20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("Invalid zoom level"));
    }

    #[tokio::test]
    async fn test_tile_out_of_range() {
        let (status, _) = get_json("/api/tile/1/2/0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_batch_upload() {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"csv\"; filename=\"points.csv\"\r\n\
             Content-Type: text/csv\r\n\r\nlatitude,longitude\n10.0,20.0\n95.0,0.0\n\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/batch?zoom=3")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-points-failed"], "1");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(1).unwrap().ends_with(",3,OK"));
    }

    #[tokio::test]
    async fn test_batch_without_csv_field() {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/batch?zoom=3")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
