//! Enumerations shared across the import stages.

use serde::{Deserialize, Serialize};

/// Kind of linear overlay feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Road,
    Railway,
    PowerLine,
}

impl FeatureKind {
    /// Name of the top-level overlay array holding this kind.
    pub fn collection_key(&self) -> &'static str {
        match self {
            FeatureKind::Road => "roads",
            FeatureKind::Railway => "railways",
            FeatureKind::PowerLine => "power_lines",
        }
    }

    /// Name of the point array inside a feature object.
    pub fn points_key(&self) -> &'static str {
        match self {
            FeatureKind::Road | FeatureKind::Railway => "points",
            FeatureKind::PowerLine => "cable_points",
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FeatureKind::Road => "road",
            FeatureKind::Railway => "railway",
            FeatureKind::PowerLine => "power line",
        };
        f.write_str(name)
    }
}

/// Sample depth of a grayscale raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleDepth {
    Eight,
    Sixteen,
}

impl SampleDepth {
    /// Map a bit count to a supported depth.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            8 => Some(SampleDepth::Eight),
            16 => Some(SampleDepth::Sixteen),
            _ => None,
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            SampleDepth::Eight => 8,
            SampleDepth::Sixteen => 16,
        }
    }

    /// Bytes per encoded sample.
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            SampleDepth::Eight => 1,
            SampleDepth::Sixteen => 2,
        }
    }
}
