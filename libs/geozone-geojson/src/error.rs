//! Error types for boundary loading

use thiserror::Error;

/// Result type alias for boundary loading
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors that can occur while loading a boundary resource
///
/// Every variant is fatal: without zones there is nothing to classify
/// against, so the application aborts at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read
    #[error("Cannot read boundary file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    /// The content is not valid GeoJSON
    #[error("Malformed GeoJSON: {0}")]
    Malformed(String),

    /// Valid GeoJSON, but not a FeatureCollection
    #[error("Expected a FeatureCollection, found a {0}")]
    NotACollection(&'static str),

    /// A feature has no geometry
    #[error("Feature #{index} has no geometry")]
    MissingGeometry { index: usize },

    /// A feature has no usable name property
    #[error("Feature #{index} has no string property '{property}'")]
    MissingName { index: usize, property: String },

    /// A feature's geometry is not areal
    #[error("Feature #{index} has unsupported geometry type {kind}")]
    UnsupportedGeometry { index: usize, kind: &'static str },

    /// The geometry could not be converted
    #[error("Feature #{index} has an invalid geometry: {reason}")]
    InvalidGeometry { index: usize, reason: String },
}

impl LoadError {
    /// Create an unreadable-file error
    pub fn unreadable(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Unreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a missing-name error
    pub fn missing_name(index: usize, property: impl Into<String>) -> Self {
        Self::MissingName {
            index,
            property: property.into(),
        }
    }
}
