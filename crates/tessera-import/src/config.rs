//! Import configuration.
//!
//! Parsed from an optional TOML file; every field has a default so an
//! empty file is a valid configuration.
//!
//! ```toml
//! world_units_per_meter = 100.0
//! parallel = true
//!
//! [raster]
//! raw_bit_depth = 16
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tessera_core::constants::DEFAULT_WORLD_UNITS_PER_METER;
use tessera_overlay::OverlayOptions;
use tessera_terrain::NormalizeOptions;

/// Errors from loading an [`ImportConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level import configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// World units per metre of survey data (100 = centimetres).
    #[serde(default = "default_world_units_per_meter")]
    pub world_units_per_meter: f64,
    /// Decode the raster and parse the overlay on separate worker threads.
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub raster: RasterConfig,
}

/// How the raster input is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RasterConfig {
    /// When set, the raster is a headerless big-endian sample stream of
    /// this bit depth, sized by the metadata dimensions.
    #[serde(default)]
    pub raw_bit_depth: Option<u8>,
}

fn default_world_units_per_meter() -> f64 {
    DEFAULT_WORLD_UNITS_PER_METER
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            world_units_per_meter: default_world_units_per_meter(),
            parallel: false,
            raster: RasterConfig::default(),
        }
    }
}

impl ImportConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            world_units_per_meter: self.world_units_per_meter,
        }
    }

    pub fn overlay_options(&self) -> OverlayOptions {
        OverlayOptions {
            world_units_per_meter: self.world_units_per_meter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ImportConfig::from_toml_str("").unwrap();
        assert_eq!(config, ImportConfig::default());
        assert_eq!(config.world_units_per_meter, 100.0);
        assert!(!config.parallel);
        assert_eq!(config.raster.raw_bit_depth, None);
    }

    #[test]
    fn test_full_config() {
        let config = ImportConfig::from_toml_str(
            "world_units_per_meter = 1.0\nparallel = true\n\n[raster]\nraw_bit_depth = 16\n",
        )
        .unwrap();
        assert_eq!(config.world_units_per_meter, 1.0);
        assert!(config.parallel);
        assert_eq!(config.raster.raw_bit_depth, Some(16));
        assert_eq!(config.normalize_options().world_units_per_meter, 1.0);
        assert_eq!(config.overlay_options().world_units_per_meter, 1.0);
    }

    #[test]
    fn test_invalid_config() {
        let err = ImportConfig::from_toml_str("parallel = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let err = ImportConfig::load(Path::new("/nonexistent/tessera.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
