//! Import constants and tuning parameters.

// --- Raster ---

/// Multiplier that stretches an 8-bit sample onto the full 16-bit range.
/// 0 → 0 and 255 → 65535 exactly.
pub const EIGHT_BIT_TO_SIXTEEN_BIT: u16 = 257;

/// Largest value a 16-bit elevation sample can hold.
pub const MAX_SAMPLE: u16 = u16::MAX;

// --- Tile layout ---

/// Valid quads-per-tile sizes, largest first.
pub const QUADS_PER_TILE_CANDIDATES: [u32; 6] = [255, 127, 63, 31, 15, 7];

/// Quad size used when no candidate divides the grid evenly.
pub const FALLBACK_QUADS_PER_TILE: u32 = 63;

/// Sections per tile. Only single-section tiles are produced.
pub const SECTIONS_PER_TILE: u32 = 1;

// --- Coordinate normalization ---

/// World units per metre of survey data (centimetre world space).
pub const DEFAULT_WORLD_UNITS_PER_METER: f64 = 100.0;

/// Divisor mapping the elevation range onto the vertical scale.
pub const ELEVATION_SCALE_DIVISOR: f64 = 512.0;

// --- Overlay paths ---

/// Minimum number of points a path needs to be emitted.
pub const MIN_PATH_POINTS: usize = 2;

/// Tangent length for the final point of a path (world units).
pub const DEFAULT_TANGENT_LENGTH: f64 = 100.0;

/// Fraction of the distance to the next point used as tangent length.
pub const TANGENT_SEGMENT_FRACTION: f64 = 0.5;

/// Lane count assumed for roads that don't declare one.
pub const DEFAULT_ROAD_LANES: u32 = 2;

/// Road width in metres when neither width nor a known road type is given.
pub const DEFAULT_ROAD_WIDTH_METERS: f64 = 5.0;

/// Track count assumed for railways that don't declare one.
pub const DEFAULT_RAIL_TRACKS: u32 = 1;

/// Standard gauge in metres.
pub const DEFAULT_RAIL_GAUGE_METERS: f64 = 1.435;

/// Cable count assumed for power lines that don't declare one.
pub const DEFAULT_POWER_LINE_CABLES: u32 = 3;
