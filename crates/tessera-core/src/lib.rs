//! Core types and definitions for the Tessera terrain importer.
//!
//! This crate defines the vocabulary shared across all other crates:
//! elevation grids, terrain metadata, tile layouts, overlay paths and
//! the import result handed to scene-construction collaborators.
//! It has no dependency on any decoding library or host runtime.

pub mod constants;
pub mod enums;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export key types for convenience.
pub use enums::{FeatureKind, SampleDepth};
pub use paths::{OverlayPath, PowerLinePath, RailPath, RoadPath, SplinePoint};
pub use types::{
    ElevationGrid, GeoBounds, GridError, NormalizedTerrain, TerrainImportResult, TerrainMetadata,
    TileLayout,
};
