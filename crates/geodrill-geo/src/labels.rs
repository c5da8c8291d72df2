//! Region labels from boundary geometry
//!
//! Boundary sources disagree on which property carries the region name, so
//! the candidates are tried in a fixed order.

use geodrill_core::error::{GeodrillError, Result};
use geojson::{Feature, GeoJson};
use std::fs;
use std::path::Path;

/// Property keys that may hold a region label, in lookup order
pub const LABEL_PROPERTIES: &[&str] = &["st_nm", "ST_NM", "NAME_1", "name"];

/// Label of a single feature, if any candidate property holds a non-empty string
pub fn feature_label(feature: &Feature) -> Option<String> {
    LABEL_PROPERTIES.iter().find_map(|key| {
        feature
            .property(key)
            .and_then(|value| value.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Labels of every feature in a document, in document order
pub fn labels_from_geojson(geojson: &GeoJson) -> Vec<String> {
    let features: Vec<&Feature> = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features.iter().collect(),
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => Vec::new(),
    };

    features
        .into_iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            let label = feature_label(feature);
            if label.is_none() {
                tracing::debug!(index, "Skipping feature without a label property");
            }
            label
        })
        .collect()
}

/// Read a GeoJSON file and return its region labels
pub fn read_labels(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| GeodrillError::GeometryLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let geojson: GeoJson = content.parse().map_err(|e| GeodrillError::GeometryLoad {
        path: path.to_path_buf(),
        reason: format!("Failed to parse GeoJSON: {}", e),
    })?;

    let labels = labels_from_geojson(&geojson);
    tracing::debug!(path = %path.display(), labels = labels.len(), "Read geometry labels");
    Ok(labels)
}
