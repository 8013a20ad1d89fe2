//! Integration tests for loading boundary files from disk

use std::io::Write;

use geozone_domain::zoning::{classify, GeoPoint};
use geozone_geojson::{GeoJsonBoundaryLoader, LoadError};

const REGIONS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "id": 0,
            "properties": { "description": "Юг", "fill": "green" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[40.0, 48.0], [45.0, 48.0], [45.0, 50.0], [40.0, 50.0], [40.0, 48.0]]]
            }
        },
        {
            "type": "Feature",
            "id": 1,
            "properties": { "description": "Центр" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[40.0, 50.0], [45.0, 50.0], [45.0, 52.0], [40.0, 52.0], [40.0, 50.0]]]
            }
        }
    ]
}"#;

#[test]
fn test_load_path_reads_regions() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(REGIONS.as_bytes())
        .expect("Failed to write regions");

    let store = GeoJsonBoundaryLoader::new()
        .load_path(file.path())
        .expect("Regions should load");

    assert_eq!(store.len(), 2);
    assert_eq!(store.zones()[0].id(), "0");
    assert_eq!(store.zones()[1].name(), "Центр");

    let south = GeoPoint::parse("49.0, 42.0").unwrap();
    let centre = GeoPoint::parse("51.25, 43.5").unwrap();
    let elsewhere = GeoPoint::parse("10.0, 10.0").unwrap();

    assert_eq!(classify(&south, &store), Some("Юг"));
    assert_eq!(classify(&centre, &store), Some("Центр"));
    assert_eq!(classify(&elsewhere, &store), None);
}

#[test]
fn test_load_path_missing_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("absent.geojson");

    let err = GeoJsonBoundaryLoader::new().load_path(&path).unwrap_err();

    assert!(matches!(err, LoadError::Unreadable { .. }));
    assert!(err.to_string().contains("absent.geojson"));
}
