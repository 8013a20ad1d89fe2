//! Errors for coordinate parsing
//!
//! A coordinate error is never fatal: the sync pass treats an unusable
//! coordinate string the same way as a point outside every zone.

use thiserror::Error;

/// Reasons a raw coordinate string could not become a [`GeoPoint`](super::GeoPoint)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    /// Nothing to parse (empty or whitespace-only input)
    #[error("Coordinate string is empty")]
    Empty,

    /// The string is not of the form `lat, lon`
    #[error("Malformed coordinate string: {0:?}")]
    Malformed(String),

    /// Syntactically valid, geographically impossible
    #[error("Coordinates out of range: latitude {latitude}, longitude {longitude}")]
    OutOfRange { latitude: f64, longitude: f64 },
}

impl CoordinateError {
    /// Create a malformed error carrying the offending input
    pub fn malformed(raw: impl Into<String>) -> Self {
        Self::Malformed(raw.into())
    }

    /// Create an out-of-range error
    pub fn out_of_range(latitude: f64, longitude: f64) -> Self {
        Self::OutOfRange {
            latitude,
            longitude,
        }
    }
}

/// Result type alias for coordinate parsing
pub type Result<T> = std::result::Result<T, CoordinateError>;
