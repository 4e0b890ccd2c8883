//! Terrain import pipeline.
//!
//! Runs the stages in order: decode raster → parse metadata → check
//! dimensions → check elevation range → normalize → parse overlay.
//! Any structural failure aborts the import; skipped overlay features
//! are logged and left out.

use std::path::{Path, PathBuf};

use tessera_core::{ElevationGrid, TerrainImportResult, TerrainMetadata};
use tessera_overlay::{parse_overlay, OverlayError, ParsedOverlay};
use tessera_terrain::{
    decode_raster, decode_samples, normalize, parse_metadata, validate_elevation_range,
    DecodeError, MetadataError,
};

use crate::config::ImportConfig;

/// Errors that abort an import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("raster decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),
    #[error(
        "raster is {raster_width}x{raster_height} but metadata says {metadata_width}x{metadata_height}"
    )]
    DimensionMismatch {
        raster_width: u32,
        raster_height: u32,
        metadata_width: u32,
        metadata_height: u32,
    },
    #[error("overlay error: {0}")]
    Overlay(#[from] OverlayError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Input files for [`TerrainImporter::import_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSources {
    pub raster: PathBuf,
    pub metadata: PathBuf,
    pub overlay: Option<PathBuf>,
}

/// Runs terrain imports with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct TerrainImporter {
    config: ImportConfig,
}

impl TerrainImporter {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import from in-memory inputs, parallel or not per the config.
    pub fn import(
        &self,
        raster: &[u8],
        metadata: &str,
        overlay: Option<&str>,
    ) -> Result<TerrainImportResult, ImportError> {
        if self.config.parallel {
            self.import_parallel(raster, metadata, overlay)
        } else {
            self.import_sequential(raster, metadata, overlay)
        }
    }

    /// Run every stage on the calling thread.
    pub fn import_sequential(
        &self,
        raster: &[u8],
        metadata: &str,
        overlay: Option<&str>,
    ) -> Result<TerrainImportResult, ImportError> {
        let (grid, metadata) = self.decode_inputs(raster, metadata)?;
        validate_inputs(&grid, &metadata)?;
        let overlay = self.parse_overlay(overlay)?;
        self.assemble(grid, metadata, overlay)
    }

    /// Decode the raster, parse the metadata and parse the overlay as
    /// independent rayon tasks, then join and cross-validate.
    ///
    /// Failures are reported in the same stage order as
    /// [`import_sequential`](Self::import_sequential).
    pub fn import_parallel(
        &self,
        raster: &[u8],
        metadata: &str,
        overlay: Option<&str>,
    ) -> Result<TerrainImportResult, ImportError> {
        let (inputs, overlay) = rayon::join(
            || self.decode_inputs_parallel(raster, metadata),
            || self.parse_overlay(overlay),
        );
        let (grid, metadata) = inputs?;
        validate_inputs(&grid, &metadata)?;
        self.assemble(grid, metadata, overlay?)
    }

    /// Read the input files and import them.
    pub fn import_files(&self, sources: &ImportSources) -> Result<TerrainImportResult, ImportError> {
        tracing::info!("Starting terrain import from {}", sources.raster.display());

        let raster = read_bytes(&sources.raster)?;
        let metadata = read_text(&sources.metadata)?;
        let overlay = sources.overlay.as_deref().map(read_text).transpose()?;

        self.import(&raster, &metadata, overlay.as_deref())
    }

    fn decode_inputs(
        &self,
        raster: &[u8],
        metadata_text: &str,
    ) -> Result<(ElevationGrid, TerrainMetadata), ImportError> {
        match self.config.raster.raw_bit_depth {
            // Raw samples carry no header; their size comes from the metadata.
            Some(depth) => {
                let metadata = parse_metadata(metadata_text)?;
                let grid = decode_samples(raster, metadata.width, metadata.height, depth)?;
                Ok((grid, metadata))
            }
            None => {
                let grid = decode_raster(raster)?;
                let metadata = parse_metadata(metadata_text)?;
                Ok((grid, metadata))
            }
        }
    }

    fn decode_inputs_parallel(
        &self,
        raster: &[u8],
        metadata_text: &str,
    ) -> Result<(ElevationGrid, TerrainMetadata), ImportError> {
        if self.config.raster.raw_bit_depth.is_some() {
            return self.decode_inputs(raster, metadata_text);
        }
        let (grid, metadata) =
            rayon::join(|| decode_raster(raster), || parse_metadata(metadata_text));
        Ok((grid?, metadata?))
    }

    fn parse_overlay(&self, overlay: Option<&str>) -> Result<ParsedOverlay, ImportError> {
        match overlay {
            Some(text) => Ok(parse_overlay(text, &self.config.overlay_options())?),
            None => Ok(ParsedOverlay::default()),
        }
    }

    fn assemble(
        &self,
        grid: ElevationGrid,
        metadata: TerrainMetadata,
        overlay: ParsedOverlay,
    ) -> Result<TerrainImportResult, ImportError> {
        let terrain = normalize(&grid, &metadata, &self.config.normalize_options());
        tracing::info!(
            "Terrain normalized: {}x{} samples, {} quads per tile, {}x{} tiles, scale ({}, {}, {})",
            terrain.grid.width(),
            terrain.grid.height(),
            terrain.layout.quads_per_tile,
            terrain.layout.tile_count_x,
            terrain.layout.tile_count_y,
            terrain.scale.x,
            terrain.scale.y,
            terrain.scale.z
        );

        for dropped in &overlay.dropped {
            tracing::warn!("Skipped overlay feature {}", dropped);
        }

        let result = TerrainImportResult {
            terrain,
            roads: overlay.roads,
            railways: overlay.railways,
            power_lines: overlay.power_lines,
        };

        tracing::info!(
            "Imported {} roads, {} railways, {} power lines",
            result.roads.len(),
            result.railways.len(),
            result.power_lines.len()
        );

        Ok(result)
    }
}

/// Cross-checks run before the overlay is looked at.
fn validate_inputs(grid: &ElevationGrid, metadata: &TerrainMetadata) -> Result<(), ImportError> {
    check_dimensions(grid, metadata)?;
    validate_elevation_range(metadata)?;
    Ok(())
}

/// Raster and metadata must describe the same grid.
pub fn check_dimensions(grid: &ElevationGrid, metadata: &TerrainMetadata) -> Result<(), ImportError> {
    if grid.width() == metadata.width && grid.height() == metadata.height {
        return Ok(());
    }
    Err(ImportError::DimensionMismatch {
        raster_width: grid.width(),
        raster_height: grid.height(),
        metadata_width: metadata.width,
        metadata_height: metadata.height,
    })
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ImportError> {
    std::fs::read(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_text(path: &Path) -> Result<String, ImportError> {
    std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
