//! Error types for mercator-tiles
//!
//! The conversion core never fails; these errors come from the validating
//! layer, CSV batch processing and the binaries built on top of them.

use std::fmt;
use std::io;

/// Result type for mercator-tiles operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in mercator-tiles operations
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// CSV reading or writing error
    Csv(csv::Error),

    /// JSON serialization error
    Json(serde_json::Error),

    /// Latitude outside the Mercator-valid range
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180]
    InvalidLongitude(f64),

    /// Zoom level outside the supported pyramid depth
    InvalidZoom(i32),

    /// Resolution that is not a positive finite number
    InvalidResolution(f64),

    /// A coordinate component that is NaN or infinite
    NonFinite(String),

    /// Tile index outside the pyramid at its zoom level
    TileOutOfRange { x: i64, y: i64, zoom: i32 },

    /// Malformed input
    InvalidInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Csv(e) => write!(f, "CSV error: {}", e),
            Error::Json(e) => write!(f, "JSON error: {}", e),
            Error::InvalidLatitude(lat) => write!(f, "Invalid latitude: {}", lat),
            Error::InvalidLongitude(lon) => write!(f, "Invalid longitude: {}", lon),
            Error::InvalidZoom(zoom) => write!(f, "Invalid zoom level: {}", zoom),
            Error::InvalidResolution(res) => write!(f, "Invalid resolution: {}", res),
            Error::NonFinite(what) => write!(f, "Non-finite value: {}", what),
            Error::TileOutOfRange { x, y, zoom } => {
                write!(f, "Tile out of range: {}/{}/{}", zoom, x, y)
            }
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Error::Csv(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json(error)
    }
}

impl Error {
    /// Returns true if the error was caused by caller-supplied values
    /// rather than by I/O
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::Csv(_) | Error::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test".to_string());
        assert_eq!(err.to_string(), "Invalid input: test");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_tile_out_of_range() {
        let err = Error::TileOutOfRange { x: 4, y: 1, zoom: 2 };
        assert_eq!(err.to_string(), "Tile out of range: 2/4/1");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_invalid_latitude() {
        let err = Error::InvalidLatitude(91.5);
        assert!(err.to_string().contains("91.5"));
    }
}
