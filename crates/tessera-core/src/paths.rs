//! Linear overlay features: roads, railways and power lines.
//!
//! Positions and tangents are world-space vectors. Every path that
//! leaves the overlay parser has at least two points.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::FeatureKind;

/// One control point of a smooth path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SplinePoint {
    pub position: DVec3,
    pub arrive_tangent: DVec3,
    pub leave_tangent: DVec3,
}

impl SplinePoint {
    /// Point at `position` with zero tangents.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadPath {
    pub id: String,
    pub name: String,
    /// Classification such as `motorway`, `primary`, `residential`.
    pub road_type: String,
    /// Carriageway width in world units.
    pub width: f64,
    pub lanes: u32,
    /// Surface material such as `asphalt` or `gravel`.
    pub surface: String,
    pub one_way: bool,
    pub points: Vec<SplinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailPath {
    pub id: String,
    pub tracks: u32,
    pub electrified: bool,
    /// Track gauge in meters.
    pub gauge: f64,
    pub points: Vec<SplinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerLinePath {
    pub id: String,
    pub cables: u32,
    /// Voltage as written by the exporter, e.g. `"110000"` or `"110 kV"`.
    pub voltage: String,
    /// Cable sag curve.
    pub cable_points: Vec<SplinePoint>,
    /// Tower footprints. No tangents.
    pub tower_positions: Vec<DVec3>,
}

/// Borrowed view over any overlay path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayPath<'a> {
    Road(&'a RoadPath),
    Rail(&'a RailPath),
    PowerLine(&'a PowerLinePath),
}

impl<'a> OverlayPath<'a> {
    pub fn kind(&self) -> FeatureKind {
        match self {
            OverlayPath::Road(_) => FeatureKind::Road,
            OverlayPath::Rail(_) => FeatureKind::Railway,
            OverlayPath::PowerLine(_) => FeatureKind::PowerLine,
        }
    }

    pub fn id(&self) -> &'a str {
        match self {
            OverlayPath::Road(road) => &road.id,
            OverlayPath::Rail(rail) => &rail.id,
            OverlayPath::PowerLine(line) => &line.id,
        }
    }

    /// The tangent-carrying points of the path.
    pub fn points(&self) -> &'a [SplinePoint] {
        match self {
            OverlayPath::Road(road) => &road.points,
            OverlayPath::Rail(rail) => &rail.points,
            OverlayPath::PowerLine(line) => &line.cable_points,
        }
    }

    /// Length of the polyline through the points (world units).
    pub fn polyline_length(&self) -> f64 {
        self.points()
            .windows(2)
            .map(|pair| pair[0].position.distance(pair[1].position))
            .sum()
    }
}
