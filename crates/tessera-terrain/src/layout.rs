//! Tile layout planning.
//!
//! A grid of `width x height` vertices has `(width - 1) x (height - 1)`
//! quads. The planner picks the largest tile size that partitions those
//! quads exactly.

use tessera_core::constants::{FALLBACK_QUADS_PER_TILE, QUADS_PER_TILE_CANDIDATES};
use tessera_core::TileLayout;

/// Choose the tile size and tile counts for a grid.
pub fn plan_tile_layout(width: u32, height: u32) -> TileLayout {
    let quads_x = width.saturating_sub(1);
    let quads_y = height.saturating_sub(1);

    let even = QUADS_PER_TILE_CANDIDATES
        .iter()
        .copied()
        .find(|&q| quads_x % q == 0 && quads_y % q == 0);

    let quads_per_tile = even.unwrap_or(FALLBACK_QUADS_PER_TILE);
    let layout = TileLayout::new(
        quads_per_tile,
        (quads_x / quads_per_tile).max(1),
        (quads_y / quads_per_tile).max(1),
        even.is_some(),
    );

    if layout.divides_evenly {
        tracing::debug!(
            "Tile layout for {}x{}: {} quads per tile, {}x{} tiles",
            width,
            height,
            layout.quads_per_tile,
            layout.tile_count_x,
            layout.tile_count_y
        );
    } else {
        let (covered_x, covered_y) = layout.covered_quads();
        tracing::warn!(
            "No tile size divides {}x{} evenly; using {} quads per tile, {}x{} tiles covering {}x{} of {}x{} quads",
            width,
            height,
            layout.quads_per_tile,
            layout.tile_count_x,
            layout.tile_count_y,
            covered_x,
            covered_y,
            quads_x,
            quads_y
        );
    }

    layout
}
