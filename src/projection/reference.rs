use crate::error::{Error, Result};
use crate::projection::constants::epsg;
use crate::projection::mercator::GlobalMercator;
use crate::types::{LatLon, Meters};
use proj::Proj;

/// PROJ-backed EPSG:4326 -> EPSG:3857 transform used to cross-check the
/// closed-form conversions
pub struct ProjReference {
    forward: Proj,
    inverse: Proj,
}

impl ProjReference {
    /// Creates the forward and inverse PROJ pipelines
    pub fn new() -> Result<Self> {
        let from = format!("EPSG:{}", epsg::WGS84);
        let to = format!("EPSG:{}", epsg::WEB_MERCATOR);

        let forward = Proj::new_known_crs(&from, &to, None)
            .map_err(|e| Error::InvalidInput(format!("Failed to create projection: {}", e)))?;
        let inverse = Proj::new_known_crs(&to, &from, None)
            .map_err(|e| Error::InvalidInput(format!("Failed to create inverse projection: {}", e)))?;

        Ok(Self { forward, inverse })
    }

    /// Projects lat/lon to meters through PROJ
    pub fn lat_lon_to_meters(&self, lat: f64, lon: f64) -> Result<Meters> {
        let (x, y) = self.forward.convert((lon, lat))
            .map_err(|e| Error::InvalidInput(format!("Transformation failed: {}", e)))?;

        Ok(Meters::new(x, y))
    }

    /// Unprojects meters to lat/lon through PROJ
    pub fn meters_to_lat_lon(&self, mx: f64, my: f64) -> Result<LatLon> {
        let (lon, lat) = self.inverse.convert((mx, my))
            .map_err(|e| Error::InvalidInput(format!("Inverse transformation failed: {}", e)))?;

        Ok(LatLon::new(lat, lon))
    }

    /// Largest distance in meters between PROJ and the closed-form projection
    pub fn max_deviation(&self, mercator: &GlobalMercator, points: &[LatLon]) -> Result<f64> {
        points.iter().try_fold(0.0f64, |max, point| {
            let expected = self.lat_lon_to_meters(point.lat, point.lon)?;
            let actual = mercator.lat_lon_to_meters(point.lat, point.lon);
            let distance = (expected.x - actual.x).hypot(expected.y - actual.y);
            Ok(max.max(distance))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> Vec<LatLon> {
        vec![
            LatLon::new(53.5461, -113.4938),
            LatLon::new(49.2827, -123.1207),
            LatLon::new(43.6532, -79.3832),
            LatLon::new(-33.8688, 151.2093),
            LatLon::new(62.4540, -114.3718),
        ]
    }

    #[test]
    fn test_forward_matches_proj() {
        let reference = ProjReference::new().unwrap();
        let deviation = reference.max_deviation(&GlobalMercator::new(), &cities()).unwrap();
        assert!(deviation < 1e-3, "deviation {} m", deviation);
    }

    #[test]
    fn test_inverse_matches_proj() {
        let reference = ProjReference::new().unwrap();
        let mercator = GlobalMercator::new();

        for point in cities() {
            let meters = mercator.lat_lon_to_meters(point.lat, point.lon);
            let expected = reference.meters_to_lat_lon(meters.x, meters.y).unwrap();
            let actual = mercator.meters_to_lat_lon(meters.x, meters.y);
            assert!((expected.lat - actual.lat).abs() < 1e-9);
            assert!((expected.lon - actual.lon).abs() < 1e-9);
        }
    }
}
