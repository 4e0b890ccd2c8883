//! Terrain raster ingestion for Tessera.
//!
//! Raster decoding, metadata parsing, tile layout planning
//! and world-space normalization of elevation grids.

pub use tessera_core as core;

pub mod layout;
pub mod metadata;
pub mod normalize;
pub mod raster;

// Re-export key types for convenience.
pub use layout::plan_tile_layout;
pub use metadata::{parse_metadata, validate_elevation_range, MetadataError};
pub use normalize::{normalize, world_scale, NormalizeOptions};
pub use raster::{decode_raster, decode_samples, DecodeError};
