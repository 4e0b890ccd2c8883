//! Terrain import orchestration for Tessera.
//!
//! Ties raster decoding, metadata parsing, normalization and overlay
//! parsing into a single import producing a [`TerrainImportResult`].

pub use tessera_core as core;
pub use tessera_overlay as overlay;
pub use tessera_terrain as terrain;

pub mod config;
pub mod pipeline;


// Re-export key types for convenience.
pub use config::{ConfigError, ImportConfig, RasterConfig};
pub use pipeline::{check_dimensions, ImportError, ImportSources, TerrainImporter};
pub use tessera_core::TerrainImportResult;
