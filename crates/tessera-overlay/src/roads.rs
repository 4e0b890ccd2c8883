//! Road width estimation for roads exported without an explicit width.

use tessera_core::constants::DEFAULT_ROAD_WIDTH_METERS;

/// Typical carriageway width in metres for a road classification.
pub fn estimated_width_meters(road_type: &str) -> f64 {
    match road_type {
        "motorway" => 12.0,
        "trunk" => 10.0,
        "primary" => 8.0,
        "secondary" => 7.0,
        "tertiary" => 6.0,
        "residential" => 5.0,
        "service" => 3.5,
        "track" => 3.0,
        "cycleway" => 2.0,
        "path" | "footway" => 1.5,
        _ => DEFAULT_ROAD_WIDTH_METERS,
    }
}
