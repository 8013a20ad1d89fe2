//! Validated geographic points
//!
//! A [`GeoPoint`] can only be obtained through validation, so holding one
//! guarantees latitude ∈ [-90, 90] and longitude ∈ [-180, 180].

use std::fmt;

use geo::Point;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::error::{CoordinateError, Result};

/// `lat, lon` with one to three integer digits and a mandatory fractional part
static COORDINATES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(-?\d{1,3}\.\d+),\s*(-?\d{1,3}\.\d+)\s*$").expect("valid coordinates regex")
});

/// A latitude/longitude pair in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Build a point from numeric values, enforcing the range constraints
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::out_of_range(latitude, longitude));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a raw `"lat, lon"` string
    ///
    /// Validation runs in two stages: the shape is checked first, then the
    /// range. Both failures are reported as errors; callers that only care
    /// about presence should use [`parse_coordinates`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use geozone_domain::zoning::GeoPoint;
    ///
    /// let point = GeoPoint::parse("49.0, 42.0").unwrap();
    /// assert_eq!(point.latitude(), 49.0);
    /// assert_eq!(point.longitude(), 42.0);
    ///
    /// assert!(GeoPoint::parse("49, 42").is_err());
    /// assert!(GeoPoint::parse("95.0, 42.0").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(CoordinateError::Empty);
        }

        let captures = COORDINATES_RE
            .captures(raw)
            .ok_or_else(|| CoordinateError::malformed(raw))?;

        let latitude = parse_component(raw, &captures[1])?;
        let longitude = parse_component(raw, &captures[2])?;

        Self::try_new(latitude, longitude)
    }

    /// Latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Convert to a planar point (x = longitude, y = latitude)
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

fn parse_component(raw: &str, component: &str) -> Result<f64> {
    component
        .parse::<f64>()
        .map_err(|_| CoordinateError::malformed(raw))
}

/// Parse optional raw coordinates, collapsing every failure to `None`
///
/// Absent, empty, malformed and out-of-range input are indistinguishable
/// here.
pub fn parse_coordinates(raw: Option<&str>) -> Option<GeoPoint> {
    raw.and_then(|raw| GeoPoint::parse(raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let point = GeoPoint::parse("49.0, 42.0").unwrap();
        assert_eq!(point.latitude(), 49.0);
        assert_eq!(point.longitude(), 42.0);
    }

    #[test]
    fn test_parse_keeps_exact_values() {
        let point = GeoPoint::parse("-33.868820, 151.209296").unwrap();
        assert_eq!(point.latitude(), -33.868820);
        assert_eq!(point.longitude(), 151.209296);
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        assert!(GeoPoint::parse("  48.5,44.25  ").is_ok());
        assert!(GeoPoint::parse("48.5,   44.25").is_ok());
    }

    #[test]
    fn test_parse_range_is_inclusive() {
        assert!(GeoPoint::parse("90.0, 180.0").is_ok());
        assert!(GeoPoint::parse("-90.0, -180.0").is_ok());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(matches!(
            GeoPoint::parse("90.5, 10.0"),
            Err(CoordinateError::OutOfRange { .. })
        ));
        assert!(matches!(
            GeoPoint::parse("10.0, -180.1"),
            Err(CoordinateError::OutOfRange { .. })
        ));
        assert!(matches!(
            GeoPoint::parse("999.0, 10.0"),
            Err(CoordinateError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_shapes() {
        let malformed = [
            "49, 42",
            "49.0; 42.0",
            "49.0 ,42.0",
            "1000.0, 42.0",
            "+49.0, 42.0",
            "49.0, 42.0, 1.0",
            "lat, lon",
            "49.0",
            ".5, 42.0",
        ];

        for raw in malformed {
            assert!(
                matches!(GeoPoint::parse(raw), Err(CoordinateError::Malformed(_))),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(GeoPoint::parse(""), Err(CoordinateError::Empty));
        assert_eq!(GeoPoint::parse("   "), Err(CoordinateError::Empty));
    }

    #[test]
    fn test_parse_coordinates_collapses_failures() {
        assert!(parse_coordinates(None).is_none());
        assert!(parse_coordinates(Some("")).is_none());
        assert!(parse_coordinates(Some("garbage")).is_none());
        assert!(parse_coordinates(Some("91.0, 0.0")).is_none());
        assert_eq!(
            parse_coordinates(Some("49.0, 42.0")),
            GeoPoint::try_new(49.0, 42.0).ok()
        );
    }

    #[test]
    fn test_to_point_swaps_axes() {
        let point = GeoPoint::try_new(49.0, 42.0).unwrap().to_point();
        assert_eq!(point.x(), 42.0);
        assert_eq!(point.y(), 49.0);
    }
}
