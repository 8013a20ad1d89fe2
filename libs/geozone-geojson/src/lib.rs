mod error;

pub use error::{LoadError, Result};

use std::path::Path;

use geo::{Geometry, MultiPolygon};
use geojson::{feature::Id, Feature, GeoJson, Value};
use geozone_domain::zoning::{BoundaryStore, Zone};
use tracing::{debug, info, warn};

/// Property holding the zone name in exported zone maps
pub const DEFAULT_NAME_PROPERTY: &str = "description";

/// Loads a [`BoundaryStore`] from a GeoJSON FeatureCollection
///
/// Each feature becomes one zone, in file order:
/// - geometry must be a Polygon or MultiPolygon
/// - the name comes from a string property (`description` by default)
/// - the id is the feature `id`, else the configured id property, else the
///   feature's 1-based position
pub struct GeoJsonBoundaryLoader {
    name_property: String,
    id_property: Option<String>,
}

impl GeoJsonBoundaryLoader {
    /// Create a loader reading names from the `description` property
    pub fn new() -> Self {
        Self {
            name_property: DEFAULT_NAME_PROPERTY.to_string(),
            id_property: None,
        }
    }

    /// Read zone names from another property
    pub fn with_name_property(mut self, property: impl Into<String>) -> Self {
        self.name_property = property.into();
        self
    }

    /// Fall back to this property when a feature has no `id`
    pub fn with_id_property(mut self, property: impl Into<String>) -> Self {
        self.id_property = Some(property.into());
        self
    }

    /// Load zones from a file
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Unreadable` if the file cannot be read, plus every
    /// error [`load_str`](Self::load_str) can return.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<BoundaryStore> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LoadError::unreadable(path.display().to_string(), e))?;

        let store = self.load_str(&text)?;
        info!(path = %path.display(), zones = store.len(), "Boundary resource loaded");

        Ok(store)
    }

    /// Load zones from GeoJSON text
    ///
    /// # Example
    ///
    /// ```rust
    /// use geozone_geojson::GeoJsonBoundaryLoader;
    ///
    /// let text = r#"{
    ///     "type": "FeatureCollection",
    ///     "features": [{
    ///         "type": "Feature",
    ///         "properties": { "description": "Юг" },
    ///         "geometry": {
    ///             "type": "Polygon",
    ///             "coordinates": [[[40.0, 48.0], [45.0, 48.0], [45.0, 50.0], [40.0, 50.0], [40.0, 48.0]]]
    ///         }
    ///     }]
    /// }"#;
    ///
    /// let store = GeoJsonBoundaryLoader::new().load_str(text).unwrap();
    /// assert_eq!(store.zones()[0].name(), "Юг");
    /// ```
    pub fn load_str(&self, text: &str) -> Result<BoundaryStore> {
        let geojson = text
            .parse::<GeoJson>()
            .map_err(|e| LoadError::Malformed(e.to_string()))?;

        let collection = match geojson {
            GeoJson::FeatureCollection(collection) => collection,
            GeoJson::Feature(_) => return Err(LoadError::NotACollection("Feature")),
            GeoJson::Geometry(_) => return Err(LoadError::NotACollection("Geometry")),
        };

        let zones = collection
            .features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| self.zone_from_feature(index, feature))
            .collect::<Result<Vec<_>>>()?;

        if zones.is_empty() {
            warn!("Boundary resource defines no zones, every record will be out of zone");
        }

        Ok(BoundaryStore::from_zones(zones))
    }

    fn zone_from_feature(&self, index: usize, feature: Feature) -> Result<Zone> {
        let name = feature
            .property(&self.name_property)
            .and_then(|value| value.as_str())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| LoadError::missing_name(index, &self.name_property))?;

        let id = self.zone_id(index, &feature);

        let geometry = feature
            .geometry
            .ok_or(LoadError::MissingGeometry { index })?;
        let geometry = to_multi_polygon(index, geometry.value)?;

        debug!(index, id = %id, name = %name, polygons = geometry.0.len(), "Loaded zone");

        Ok(Zone::new(id, name, geometry))
    }

    fn zone_id(&self, index: usize, feature: &Feature) -> String {
        let from_feature = feature.id.as_ref().map(|id| match id {
            Id::String(s) => s.clone(),
            Id::Number(n) => n.to_string(),
        });

        from_feature
            .or_else(|| {
                self.id_property
                    .as_deref()
                    .and_then(|property| feature.property(property))
                    .and_then(scalar_to_string)
            })
            .unwrap_or_else(|| (index + 1).to_string())
    }
}

impl Default for GeoJsonBoundaryLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn to_multi_polygon(index: usize, value: Value) -> Result<MultiPolygon<f64>> {
    let kind = geometry_kind(&value);
    if !matches!(value, Value::Polygon(_) | Value::MultiPolygon(_)) {
        return Err(LoadError::UnsupportedGeometry { index, kind });
    }

    let geometry = Geometry::<f64>::try_from(value).map_err(|e| LoadError::InvalidGeometry {
        index,
        reason: e.to_string(),
    })?;

    match geometry {
        Geometry::Polygon(polygon) => Ok(MultiPolygon::new(vec![polygon])),
        Geometry::MultiPolygon(multi) => Ok(multi),
        _ => Err(LoadError::UnsupportedGeometry { index, kind }),
    }
}
