//! Vector overlay parser.
//!
//! The overlay document is a JSON object with optional `roads`,
//! `railways` and `power_lines` arrays. Only a document that is not a
//! JSON object is an error; malformed features and points are skipped
//! and reported through [`ParsedOverlay::dropped`].

use glam::DVec3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use tessera_core::constants::{
    DEFAULT_POWER_LINE_CABLES, DEFAULT_RAIL_GAUGE_METERS, DEFAULT_RAIL_TRACKS, DEFAULT_ROAD_LANES,
    DEFAULT_WORLD_UNITS_PER_METER, MIN_PATH_POINTS,
};
use tessera_core::{FeatureKind, PowerLinePath, RailPath, RoadPath, SplinePoint};

use crate::roads::estimated_width_meters;
use crate::tangent::spline_from_positions;

type JsonObject = Map<String, Value>;

/// Errors from overlay parsing. Only the top-level document can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OverlayError {
    #[error("malformed overlay document: {0}")]
    MalformedDocument(String),
}

/// Settings that affect derived feature attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayOptions {
    /// Used to convert estimated road widths (metres) to world units.
    pub world_units_per_meter: f64,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            world_units_per_meter: DEFAULT_WORLD_UNITS_PER_METER,
        }
    }
}

/// Why a feature was left out of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropReason {
    NotAnObject,
    TooFewPoints { usable: usize },
}

/// A feature skipped during parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedFeature {
    pub kind: FeatureKind,
    /// Position in the source array.
    pub index: usize,
    pub id: Option<String>,
    pub reason: DropReason,
}

impl std::fmt::Display for DroppedFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}", self.kind, self.index)?;
        if let Some(id) = &self.id {
            write!(f, " ({id})")?;
        }
        match self.reason {
            DropReason::NotAnObject => write!(f, ": not an object"),
            DropReason::TooFewPoints { usable } => {
                write!(f, ": {usable} usable point(s), need {MIN_PATH_POINTS}")
            }
        }
    }
}

/// Parsed overlay paths, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedOverlay {
    pub roads: Vec<RoadPath>,
    pub railways: Vec<RailPath>,
    pub power_lines: Vec<PowerLinePath>,
    pub dropped: Vec<DroppedFeature>,
}

/// Parse an overlay document into roads, railways and power lines.
pub fn parse_overlay(text: &str, options: &OverlayOptions) -> Result<ParsedOverlay, OverlayError> {
    let doc: Value =
        serde_json::from_str(text).map_err(|e| OverlayError::MalformedDocument(e.to_string()))?;
    let root = doc
        .as_object()
        .ok_or_else(|| OverlayError::MalformedDocument("top level is not an object".into()))?;

    let mut dropped = Vec::new();

    let roads = parse_collection(root, FeatureKind::Road, &mut dropped, |obj, id, points| {
        let road_type = text_field(obj, "road_type").unwrap_or_default();
        let width = number_field(obj, "width").unwrap_or_else(|| {
            estimated_width_meters(&road_type) * options.world_units_per_meter
        });
        RoadPath {
            id,
            name: text_field(obj, "name").unwrap_or_default(),
            road_type,
            width,
            lanes: count_field(obj, "lanes").unwrap_or(DEFAULT_ROAD_LANES),
            surface: text_field(obj, "surface").unwrap_or_default(),
            one_way: flag_field(obj, "one_way").unwrap_or(false),
            points,
        }
    });

    let railways = parse_collection(root, FeatureKind::Railway, &mut dropped, |obj, id, points| {
        RailPath {
            id,
            tracks: count_field(obj, "tracks").unwrap_or(DEFAULT_RAIL_TRACKS),
            electrified: flag_field(obj, "electrified").unwrap_or(false),
            gauge: number_field(obj, "gauge").unwrap_or(DEFAULT_RAIL_GAUGE_METERS),
            points,
        }
    });

    let power_lines =
        parse_collection(root, FeatureKind::PowerLine, &mut dropped, |obj, id, cable_points| {
            PowerLinePath {
                id,
                cables: count_field(obj, "cables").unwrap_or(DEFAULT_POWER_LINE_CABLES),
                voltage: text_field(obj, "voltage").unwrap_or_default(),
                cable_points,
                tower_positions: tower_positions(obj),
            }
        });

    tracing::debug!(
        "Overlay parsed: {} roads, {} railways, {} power lines, {} dropped",
        roads.len(),
        railways.len(),
        power_lines.len(),
        dropped.len()
    );

    Ok(ParsedOverlay {
        roads,
        railways,
        power_lines,
        dropped,
    })
}

/// Walk one top-level array, building a path for every usable feature.
fn parse_collection<T>(
    root: &JsonObject,
    kind: FeatureKind,
    dropped: &mut Vec<DroppedFeature>,
    build: impl Fn(&JsonObject, String, Vec<SplinePoint>) -> T,
) -> Vec<T> {
    let items = match root.get(kind.collection_key()) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            tracing::warn!(
                "Overlay field `{}` is not an array; ignoring it",
                kind.collection_key()
            );
            return Vec::new();
        }
    };

    let mut paths = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            dropped.push(DroppedFeature {
                kind,
                index,
                id: None,
                reason: DropReason::NotAnObject,
            });
            continue;
        };

        let id = text_field(obj, "spline_id");
        let positions = point_positions(obj, kind.points_key());
        if positions.len() < MIN_PATH_POINTS {
            dropped.push(DroppedFeature {
                kind,
                index,
                id,
                reason: DropReason::TooFewPoints {
                    usable: positions.len(),
                },
            });
            continue;
        }

        paths.push(build(obj, id.unwrap_or_default(), spline_from_positions(positions)));
    }
    paths
}

/// Positions of the `{ "position": [x, y, z] }` entries. Bad entries are skipped.
fn point_positions(obj: &JsonObject, key: &str) -> Vec<DVec3> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|points| {
            points
                .iter()
                .filter_map(|point| point.as_object()?.get("position").and_then(parse_vec3))
                .collect()
        })
        .unwrap_or_default()
}

fn tower_positions(obj: &JsonObject) -> Vec<DVec3> {
    obj.get("tower_positions")
        .and_then(Value::as_array)
        .map(|towers| towers.iter().filter_map(parse_vec3).collect())
        .unwrap_or_default()
}

/// A numeric sequence with at least three entries; extra entries are ignored.
fn parse_vec3(value: &Value) -> Option<DVec3> {
    let coords = value.as_array()?;
    if coords.len() < 3 {
        return None;
    }
    let x = coords[0].as_f64()?;
    let y = coords[1].as_f64()?;
    let z = coords[2].as_f64()?;
    let v = DVec3::new(x, y, z);
    v.is_finite().then_some(v)
}

/// String field; numbers are accepted and rendered as text.
fn text_field(obj: &JsonObject, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number_field(obj: &JsonObject, key: &str) -> Option<f64> {
    obj.get(key)?.as_f64()
}

fn count_field(obj: &JsonObject, key: &str) -> Option<u32> {
    let value = obj.get(key)?;
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    // Exporters sometimes write counts as floats.
    value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u32::MAX as f64)
        .map(|f| f as u32)
}

fn flag_field(obj: &JsonObject, key: &str) -> Option<bool> {
    obj.get(key)?.as_bool()
}
