//! Vector overlay ingestion for Tessera.
//!
//! Parses roads, railways and power lines from the overlay JSON
//! document and computes smooth interpolation tangents for their points.

pub use tessera_core as core;

pub mod parser;
pub mod roads;
pub mod tangent;

// Re-export key types for convenience.
pub use parser::{parse_overlay, DropReason, DroppedFeature, OverlayError, OverlayOptions, ParsedOverlay};
pub use tangent::{estimate_tangents, spline_from_positions};
