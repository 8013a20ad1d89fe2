//! Zoning domain module
//!
//! Named polygonal zones, validated geographic points and the
//! point-in-zone classification that ties them together.

mod classifier;
mod error;
mod point;
mod zone;

pub use classifier::classify;
pub use error::CoordinateError;
pub use point::{parse_coordinates, GeoPoint};
pub use zone::{BoundaryStore, Zone};
