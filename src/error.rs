use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Longitude '{longitude}' is out of range (valid: -180.0..=180.0)")]
    InvalidLongitude { longitude: f64 },

    #[error("Latitude '{latitude}' is out of range (valid: -90.0..=90.0)")]
    InvalidLatitude { latitude: f64 },

    #[error("A ring requires at least one point")]
    EmptyRing,

    #[error("Circle approximation requires at least 3 segments, got '{segments}'")]
    TooFewSegments { segments: usize },

    #[error("A position must be [longitude, latitude], got {len} elements")]
    InvalidPosition { len: usize },

    #[error("Unsupported GeoJSON geometry type '{found}' (expected Point or Polygon)")]
    UnsupportedGeometry { found: &'static str },

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}
