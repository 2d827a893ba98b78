//! District list loading from a GeoJSON feature collection.
//!
//! Only `features[].properties.name` is read; array order is kept because it
//! decides which patch each district is assigned to.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DistrictError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("district list `{0}` is not a valid feature collection")]
    Json(PathBuf, #[source] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    name: String,
}

/// Parse district names from feature collection JSON, in array order.
pub fn parse_districts(json: &str) -> Result<Vec<String>, serde_json::Error> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    Ok(collection
        .features
        .into_iter()
        .map(|feature| feature.properties.name)
        .collect())
}

/// Read and parse the district list file.
pub fn load_districts(path: &Path) -> Result<Vec<String>, DistrictError> {
    let content =
        fs::read_to_string(path).map_err(|err| DistrictError::Io(path.to_path_buf(), err))?;
    parse_districts(&content).map_err(|err| DistrictError::Json(path.to_path_buf(), err))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "name": "Beşiktaş", "code": 34 }, "geometry": null },
            { "type": "Feature", "properties": { "name": "Şişli" } },
            { "type": "Feature", "properties": { "name": "Eyüp Sultan" } }
        ]
    }"#;

    #[test]
    fn test_parse_keeps_order_and_letters() {
        let names = parse_districts(SAMPLE).unwrap();
        assert_eq!(names, vec!["Beşiktaş", "Şişli", "Eyüp Sultan"]);
    }

    #[test]
    fn test_parse_empty_features() {
        let names = parse_districts(r#"{"features": []}"#).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_parse_missing_name_fails() {
        let result = parse_districts(r#"{"features": [{"properties": {"title": "x"}}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_malformed_json_fails() {
        assert!(parse_districts("{ features: ").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = load_districts(&temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DistrictError::Io(..)));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("districts.json");
        fs::write(&path, SAMPLE).unwrap();
        assert_eq!(load_districts(&path).unwrap().len(), 3);
    }
}
