//! Fundamental terrain data types.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_SAMPLE, SECTIONS_PER_TILE};
use crate::paths::{OverlayPath, PowerLinePath, RailPath, RoadPath};

/// Errors raised when constructing an [`ElevationGrid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid of {width}x{height} needs {expected} samples, got {actual}")]
    SampleCount {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Dense 16-bit elevation raster.
///
/// Samples are row-major, row 0 first. The sample count always equals
/// `width * height`; the constructor rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridParts")]
pub struct ElevationGrid {
    width: u32,
    height: u32,
    samples: Vec<u16>,
}

#[derive(Deserialize)]
struct GridParts {
    width: u32,
    height: u32,
    samples: Vec<u16>,
}

impl TryFrom<GridParts> for ElevationGrid {
    type Error = GridError;

    fn try_from(parts: GridParts) -> Result<Self, Self::Error> {
        ElevationGrid::new(parts.width, parts.height, parts.samples)
    }
}

impl ElevationGrid {
    /// Create a grid, checking the sample count against the dimensions.
    pub fn new(width: u32, height: u32, samples: Vec<u16>) -> Result<Self, GridError> {
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(GridError::SampleCount {
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Grid where every sample holds the same value.
    pub fn filled(width: u32, height: u32, value: u16) -> Self {
        Self {
            width,
            height,
            samples: vec![value; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u16> {
        self.samples
    }

    /// Sample at column `col`, row `row`. None outside the grid.
    pub fn get(&self, col: u32, row: u32) -> Option<u16> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.samples
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    /// One row of samples. Panics if `row` is out of range.
    pub fn row(&self, row: u32) -> &[u16] {
        let w = self.width as usize;
        let start = row as usize * w;
        &self.samples[start..start + w]
    }

    /// Smallest and largest sample, or None for an empty grid.
    pub fn min_max(&self) -> Option<(u16, u16)> {
        let min = self.samples.iter().copied().min()?;
        let max = self.samples.iter().copied().max()?;
        Some((min, max))
    }

    /// Copy of the grid with row order reversed.
    ///
    /// Output row `r` holds input row `height - 1 - r`. Applying it twice
    /// yields the original grid.
    pub fn flip_rows(&self) -> ElevationGrid {
        let w = self.width as usize;
        let mut flipped = Vec::with_capacity(self.samples.len());
        if w > 0 {
            for row in self.samples.chunks_exact(w).rev() {
                flipped.extend_from_slice(row);
            }
        }
        ElevationGrid {
            width: self.width,
            height: self.height,
            samples: flipped,
        }
    }
}

/// Geographic bounding box carried through from the survey metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// `[minX, minY]` in the source CRS.
    pub min: [f64; 2],
    /// `[maxX, maxY]` in the source CRS.
    pub max: [f64; 2],
}

impl GeoBounds {
    /// Build from the `[minX, minY, maxX, maxY]` layout used by exporters.
    pub fn from_array(values: [f64; 4]) -> Self {
        Self {
            min: [values[0], values[1]],
            max: [values[2], values[3]],
        }
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }
}

/// Georeferencing and elevation-range metadata for a raster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainMetadata {
    /// Raster width in samples.
    pub width: u32,
    /// Raster height in samples.
    pub height: u32,
    /// Elevation (meters) represented by sample value 0.
    pub min_elevation: f64,
    /// Elevation (meters) represented by sample value 65535.
    pub max_elevation: f64,
    /// Meters per sample along X.
    pub pixel_size_x: f64,
    /// Meters per sample along Y.
    pub pixel_size_y: f64,
    /// Coordinate reference system label. Carried, never interpreted.
    pub crs: String,
    pub bounds: Option<GeoBounds>,
}

impl TerrainMetadata {
    pub fn elevation_range(&self) -> f64 {
        self.max_elevation - self.min_elevation
    }

    /// True when `max_elevation > min_elevation` and both are finite.
    pub fn has_valid_elevation_range(&self) -> bool {
        self.min_elevation.is_finite()
            && self.max_elevation.is_finite()
            && self.max_elevation > self.min_elevation
    }

    /// Map a 16-bit sample back to meters.
    pub fn sample_to_elevation(&self, sample: u16) -> f64 {
        self.min_elevation + (sample as f64 / MAX_SAMPLE as f64) * self.elevation_range()
    }
}

/// Partition of an elevation grid into fixed-size tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayout {
    /// Quads along one tile edge.
    pub quads_per_tile: u32,
    /// Tiles along X (west to east).
    pub tile_count_x: u32,
    /// Tiles along Y.
    pub tile_count_y: u32,
    pub sections_per_tile: u32,
    /// False when the fallback size was used and the grid edges need
    /// padding or truncation by the caller.
    pub divides_evenly: bool,
}

impl TileLayout {
    pub fn new(quads_per_tile: u32, tile_count_x: u32, tile_count_y: u32, divides_evenly: bool) -> Self {
        Self {
            quads_per_tile,
            tile_count_x,
            tile_count_y,
            sections_per_tile: SECTIONS_PER_TILE,
            divides_evenly,
        }
    }

    /// Quads along one section edge.
    pub fn subsection_quads(&self) -> u32 {
        self.quads_per_tile / self.sections_per_tile.max(1)
    }

    /// Vertices along one tile edge (tiles share their border vertices).
    pub fn vertices_per_tile(&self) -> u32 {
        self.quads_per_tile + 1
    }

    pub fn tile_count(&self) -> u32 {
        self.tile_count_x * self.tile_count_y
    }

    /// Quads covered by the tile grid along X and Y.
    pub fn covered_quads(&self) -> (u32, u32) {
        (
            self.tile_count_x * self.quads_per_tile,
            self.tile_count_y * self.quads_per_tile,
        )
    }

    /// Quad-space origin of every tile, row by row.
    pub fn tile_origins(&self) -> impl Iterator<Item = [u32; 2]> + '_ {
        (0..self.tile_count_y).flat_map(move |y| {
            (0..self.tile_count_x)
                .map(move |x| [x * self.quads_per_tile, y * self.quads_per_tile])
        })
    }
}

/// Elevation grid aligned with world space, ready for mesh generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTerrain {
    /// Grid with rows in bottom-up world order.
    pub grid: ElevationGrid,
    /// World units per sample step (x, y) and per height unit (z).
    pub scale: DVec3,
    pub layout: TileLayout,
}

impl NormalizedTerrain {
    /// Horizontal size of the terrain in world units.
    pub fn world_extent(&self) -> DVec2 {
        let w = self.grid.width().saturating_sub(1) as f64;
        let h = self.grid.height().saturating_sub(1) as f64;
        DVec2::new(w * self.scale.x, h * self.scale.y)
    }
}

/// Everything one import produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainImportResult {
    pub terrain: NormalizedTerrain,
    pub roads: Vec<RoadPath>,
    pub railways: Vec<RailPath>,
    pub power_lines: Vec<PowerLinePath>,
}

impl TerrainImportResult {
    /// All overlay paths, roads first, then railways, then power lines.
    pub fn paths(&self) -> impl Iterator<Item = OverlayPath<'_>> {
        self.roads
            .iter()
            .map(OverlayPath::Road)
            .chain(self.railways.iter().map(OverlayPath::Rail))
            .chain(self.power_lines.iter().map(OverlayPath::PowerLine))
    }

    pub fn feature_count(&self) -> usize {
        self.roads.len() + self.railways.len() + self.power_lines.len()
    }
}
