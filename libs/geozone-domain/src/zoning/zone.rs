//! Zones and the boundary store
//!
//! A [`BoundaryStore`] is built once at startup from whatever boundary
//! resource the application loads, and is read-only afterwards.

use geo::{Contains, MultiPolygon, Polygon};

use super::point::GeoPoint;

/// A named polygonal region
///
/// Zones are immutable once built. Overlaps between zones are allowed;
/// the store's order decides which one wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    id: String,
    name: String,
    geometry: MultiPolygon<f64>,
}

impl Zone {
    /// Create a zone from a (multi)polygon geometry
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        geometry: impl Into<MultiPolygon<f64>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            geometry: geometry.into(),
        }
    }

    /// Create a single-polygon zone
    pub fn from_polygon(id: impl Into<String>, name: impl Into<String>, polygon: Polygon<f64>) -> Self {
        Self::new(id, name, MultiPolygon::new(vec![polygon]))
    }

    /// Zone identifier as found in the boundary resource
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable zone name, used for the zone code lookup
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The zone's geometry
    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// Check whether the point lies strictly inside this zone
    ///
    /// Points exactly on the boundary are NOT contained (OGC `contains`
    /// semantics, as implemented by [`geo::Contains`]).
    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.geometry.contains(&point.to_point())
    }
}

/// Ordered, immutable collection of zones
#[derive(Debug, Clone, Default)]
pub struct BoundaryStore {
    zones: Vec<Zone>,
}

impl BoundaryStore {
    /// Build a store; the given order is the classification order
    pub fn from_zones(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    /// Zones in load order
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// First zone (in load order) containing the point
    pub fn find_zone(&self, point: &GeoPoint) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.contains(point))
    }
}

impl FromIterator<Zone> for BoundaryStore {
    fn from_iter<I: IntoIterator<Item = Zone>>(iter: I) -> Self {
        Self::from_zones(iter.into_iter().collect())
    }
}
