//! Point classification
//!
//! Pure function over a point and a store: the first zone in load order
//! whose geometry contains the point wins.

use super::{point::GeoPoint, zone::BoundaryStore};

/// Name of the first zone containing `point`, or `None` when it lies
/// outside every zone (or exactly on a boundary)
///
/// # Example
///
/// ```rust
/// use geo::{coord, Rect};
/// use geozone_domain::zoning::{classify, BoundaryStore, GeoPoint, Zone};
///
/// let south = Rect::new(coord! { x: 40.0, y: 48.0 }, coord! { x: 45.0, y: 50.0 });
/// let store = BoundaryStore::from_zones(vec![Zone::from_polygon("1", "Юг", south.to_polygon())]);
///
/// let point = GeoPoint::parse("49.0, 42.0").unwrap();
/// assert_eq!(classify(&point, &store), Some("Юг"));
/// ```
pub fn classify<'a>(point: &GeoPoint, store: &'a BoundaryStore) -> Option<&'a str> {
    store.find_zone(point).map(|zone| zone.name())
}
