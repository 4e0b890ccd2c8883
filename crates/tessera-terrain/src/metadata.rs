//! Terrain metadata parser.
//!
//! The metadata document is a JSON object with a `heightmap` section:
//!
//! ```json
//! { "heightmap": { "width": 1025, "height": 1025,
//!                  "min_elevation": 12.5, "max_elevation": 840.0,
//!                  "pixel_size_x": 30.0, "pixel_size_y": 30.0,
//!                  "crs": "EPSG:4326",
//!                  "bounds": [56.0, 26.0, 57.0, 27.0] } }
//! ```

use serde::Deserialize;
use serde_json::Value;

use tessera_core::{GeoBounds, TerrainMetadata};

/// Errors from metadata parsing and validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetadataError {
    #[error("metadata is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("malformed metadata document: {0}")]
    MalformedDocument(String),
    #[error("metadata field `{field}` has invalid value {value}")]
    InvalidValue { field: &'static str, value: f64 },
    #[error("degenerate elevation range: min {min} is not below max {max}")]
    DegenerateElevationRange { min: f64, max: f64 },
}

#[derive(Deserialize)]
struct MetadataDocument {
    heightmap: Option<HeightmapSection>,
}

/// Every field optional so a missing one can be named.
#[derive(Deserialize)]
struct HeightmapSection {
    #[serde(default)]
    width: Option<Value>,
    #[serde(default)]
    height: Option<Value>,
    min_elevation: Option<f64>,
    max_elevation: Option<f64>,
    pixel_size_x: Option<f64>,
    pixel_size_y: Option<f64>,
    crs: Option<String>,
    #[serde(default)]
    bounds: Option<Value>,
}

/// Parse a metadata document.
pub fn parse_metadata(text: &str) -> Result<TerrainMetadata, MetadataError> {
    let doc: MetadataDocument =
        serde_json::from_str(text).map_err(|e| MetadataError::MalformedDocument(e.to_string()))?;
    let section = doc.heightmap.ok_or(MetadataError::MissingField("heightmap"))?;

    let metadata = TerrainMetadata {
        width: dimension(required(section.width, "width")?, "width")?,
        height: dimension(required(section.height, "height")?, "height")?,
        min_elevation: required(section.min_elevation, "min_elevation")?,
        max_elevation: required(section.max_elevation, "max_elevation")?,
        pixel_size_x: positive(required(section.pixel_size_x, "pixel_size_x")?, "pixel_size_x")?,
        pixel_size_y: positive(required(section.pixel_size_y, "pixel_size_y")?, "pixel_size_y")?,
        crs: required(section.crs, "crs")?,
        bounds: section.bounds.as_ref().and_then(parse_bounds),
    };

    tracing::info!(
        "Metadata parsed: {}x{}, elevation {:.2} to {:.2}, pixel {}x{}, crs {}",
        metadata.width,
        metadata.height,
        metadata.min_elevation,
        metadata.max_elevation,
        metadata.pixel_size_x,
        metadata.pixel_size_y,
        metadata.crs
    );

    Ok(metadata)
}

/// Check that the elevation range can drive a vertical scale.
pub fn validate_elevation_range(metadata: &TerrainMetadata) -> Result<(), MetadataError> {
    if metadata.has_valid_elevation_range() {
        Ok(())
    } else {
        Err(MetadataError::DegenerateElevationRange {
            min: metadata.min_elevation,
            max: metadata.max_elevation,
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, MetadataError> {
    value.ok_or(MetadataError::MissingField(field))
}

/// Integer dimension; exporters sometimes write `64.0` for `64`.
fn dimension(value: Value, field: &'static str) -> Result<u32, MetadataError> {
    if let Some(n) = value.as_u64() {
        if let Ok(n) = u32::try_from(n) {
            return Ok(n);
        }
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u32::MAX as f64)
        .map(|f| f as u32)
        .ok_or_else(|| {
            MetadataError::MalformedDocument(format!("field `{field}` is not an integer: {value}"))
        })
}

fn positive(value: f64, field: &'static str) -> Result<f64, MetadataError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MetadataError::InvalidValue { field, value })
    }
}

/// `[minX, minY, maxX, maxY]`. Anything else counts as absent.
fn parse_bounds(value: &Value) -> Option<GeoBounds> {
    let items = value.as_array()?;
    if items.len() != 4 {
        return None;
    }
    let mut coords = [0.0; 4];
    for (slot, item) in coords.iter_mut().zip(items) {
        *slot = item.as_f64()?;
    }
    Some(GeoBounds::from_array(coords))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "heightmap": {
            "width": 64, "height": 64,
            "min_elevation": 0, "max_elevation": 100,
            "pixel_size_x": 1, "pixel_size_y": 1.5,
            "crs": "EPSG:4326",
            "bounds": [56.0, 26.0, 57.0, 27.0]
        }
    }"#;

    fn without(field: &str) -> String {
        let mut doc: Value = serde_json::from_str(FULL).unwrap();
        doc["heightmap"].as_object_mut().unwrap().remove(field);
        doc.to_string()
    }

    #[test]
    fn test_parse_full_document() {
        let meta = parse_metadata(FULL).unwrap();
        assert_eq!(meta.width, 64);
        assert_eq!(meta.height, 64);
        assert_eq!(meta.min_elevation, 0.0);
        assert_eq!(meta.max_elevation, 100.0);
        assert_eq!(meta.pixel_size_x, 1.0);
        assert_eq!(meta.pixel_size_y, 1.5);
        assert_eq!(meta.crs, "EPSG:4326");
        let bounds = meta.bounds.expect("bounds should be present");
        assert_eq!(bounds.min, [56.0, 26.0]);
        assert_eq!(bounds.max, [57.0, 27.0]);
    }

    #[test]
    fn test_each_required_field_is_named() {
        let fields = [
            "width",
            "height",
            "min_elevation",
            "max_elevation",
            "pixel_size_x",
            "pixel_size_y",
            "crs",
        ];
        for field in fields {
            let err = parse_metadata(&without(field)).unwrap_err();
            assert_eq!(err, MetadataError::MissingField(field), "field {field}");
        }
    }

    #[test]
    fn test_missing_heightmap_section() {
        let err = parse_metadata(r#"{"terrain": {}}"#).unwrap_err();
        assert_eq!(err, MetadataError::MissingField("heightmap"));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_metadata("{ not json").unwrap_err();
        assert!(matches!(err, MetadataError::MalformedDocument(_)));

        let err = parse_metadata("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, MetadataError::MalformedDocument(_)));
    }

    #[test]
    fn test_wrong_field_type_is_malformed() {
        let doc = FULL.replace("\"width\": 64", "\"width\": \"wide\"");
        assert!(matches!(
            parse_metadata(&doc),
            Err(MetadataError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_float_encoded_dimensions() {
        let doc = FULL
            .replace("\"width\": 64", "\"width\": 64.0")
            .replace("\"height\": 64", "\"height\": 32.0");
        let meta = parse_metadata(&doc).unwrap();
        assert_eq!(meta.width, 64);
        assert_eq!(meta.height, 32);

        let doc = FULL.replace("\"width\": 64", "\"width\": 64.5");
        assert!(matches!(
            parse_metadata(&doc),
            Err(MetadataError::MalformedDocument(_))
        ));

        let doc = FULL.replace("\"height\": 64", "\"height\": -1");
        assert!(matches!(
            parse_metadata(&doc),
            Err(MetadataError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_bounds_wrong_length_is_absent() {
        let doc = FULL.replace("[56.0, 26.0, 57.0, 27.0]", "[56.0, 26.0, 57.0]");
        let meta = parse_metadata(&doc).unwrap();
        assert!(meta.bounds.is_none());

        let doc = FULL.replace("[56.0, 26.0, 57.0, 27.0]", "[1, 2, 3, 4, 5]");
        assert!(parse_metadata(&doc).unwrap().bounds.is_none());
    }

    #[test]
    fn test_bounds_non_numeric_is_absent() {
        let doc = FULL.replace("[56.0, 26.0, 57.0, 27.0]", "[\"a\", 26.0, 57.0, 27.0]");
        assert!(parse_metadata(&doc).unwrap().bounds.is_none());

        let doc = FULL.replace("[56.0, 26.0, 57.0, 27.0]", "\"56,26,57,27\"");
        assert!(parse_metadata(&doc).unwrap().bounds.is_none());
    }

    #[test]
    fn test_bounds_absent() {
        let meta = parse_metadata(&without("bounds")).unwrap();
        assert!(meta.bounds.is_none());
    }

    #[test]
    fn test_non_positive_pixel_size() {
        let doc = FULL.replace("\"pixel_size_x\": 1", "\"pixel_size_x\": 0");
        assert_eq!(
            parse_metadata(&doc).unwrap_err(),
            MetadataError::InvalidValue {
                field: "pixel_size_x",
                value: 0.0
            }
        );
    }

    #[test]
    fn test_degenerate_range_parses_but_fails_validation() {
        let doc = FULL.replace("\"max_elevation\": 100", "\"max_elevation\": 0");
        let meta = parse_metadata(&doc).expect("degenerate range is not a parse error");
        assert_eq!(
            validate_elevation_range(&meta),
            Err(MetadataError::DegenerateElevationRange { min: 0.0, max: 0.0 })
        );

        let meta = parse_metadata(FULL).unwrap();
        assert!(validate_elevation_range(&meta).is_ok());
    }
}
