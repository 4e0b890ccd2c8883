//! Coordinate normalization: raster space to world space.
//!
//! Raster rows run top-down (north first); world rows run bottom-up.
//! Horizontal scale converts metres per sample to world units; the
//! vertical scale spreads the elevation range over the sample range.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use tessera_core::constants::{DEFAULT_WORLD_UNITS_PER_METER, ELEVATION_SCALE_DIVISOR};
use tessera_core::{ElevationGrid, NormalizedTerrain, TerrainMetadata};

use crate::layout::plan_tile_layout;

/// Unit conversion settings for normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// World units per metre (100 for centimetre world space).
    pub world_units_per_meter: f64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            world_units_per_meter: DEFAULT_WORLD_UNITS_PER_METER,
        }
    }
}

/// World-space scale for a raster described by `metadata`.
pub fn world_scale(metadata: &TerrainMetadata, options: &NormalizeOptions) -> DVec3 {
    DVec3::new(
        metadata.pixel_size_x * options.world_units_per_meter,
        metadata.pixel_size_y * options.world_units_per_meter,
        metadata.elevation_range() / ELEVATION_SCALE_DIVISOR,
    )
}

/// Flip the grid into world row order and attach scale and tile layout.
///
/// Dimensions are assumed to agree with `metadata`; the caller checks.
pub fn normalize(
    grid: &ElevationGrid,
    metadata: &TerrainMetadata,
    options: &NormalizeOptions,
) -> NormalizedTerrain {
    let scale = world_scale(metadata, options);
    let layout = plan_tile_layout(grid.width(), grid.height());

    tracing::debug!(
        "Normalizing {}x{} grid: scale ({}, {}, {})",
        grid.width(),
        grid.height(),
        scale.x,
        scale.y,
        scale.z
    );

    NormalizedTerrain {
        grid: grid.flip_rows(),
        scale,
        layout,
    }
}
