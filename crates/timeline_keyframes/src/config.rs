// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine configuration.
//!
//! Stored as RON next to the project, e.g. `animation.ron`:
//!
//! ```ron
//! EngineConfig(
//!     version: 1,
//!     default_easing: "ease-in-out",
//!     default_interpolation: linear,
//!     spline_mode: CatmullRom,
//! )
//! ```

use crate::easing::Easing;
use crate::keyframe::InterpolationMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// How `spline` keyframes are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplineMode {
    /// Same as linear interpolation
    #[default]
    Linear,
    /// Uniform Catmull-Rom through the neighbouring keyframes
    CatmullRom,
}

/// Errors loading or saving a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// RON serialization failed
    #[error("RON serialization error: {0}")]
    Ron(#[from] ron::Error),

    /// RON text could not be parsed
    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// File was written by a newer version
    #[error("Config version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Highest supported version
        supported: u32,
    },
}

/// Engine-wide defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Format version
    pub version: u32,
    /// Easing for keyframes added without one
    pub default_easing: Easing,
    /// Interpolation for keyframes added without one
    pub default_interpolation: InterpolationMode,
    /// Evaluation of `spline` keyframes
    pub spline_mode: SplineMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            default_easing: Easing::Linear,
            default_interpolation: InterpolationMode::Linear,
            spline_mode: SplineMode::Linear,
        }
    }
}

impl EngineConfig {
    /// Parse from RON text
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = ron::from_str(s)?;

        if config.version > CONFIG_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_FORMAT_VERSION,
            });
        }

        Ok(config)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Load from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&content).inspect_err(|e| {
            tracing::warn!("Rejected engine config {:?}: {e}", path);
        })?;
        tracing::debug!("Loaded engine config from {:?}", path);
        Ok(config)
    }

    /// Save to a RON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.version, CONFIG_FORMAT_VERSION);
        assert_eq!(config.default_easing, Easing::Linear);
        assert_eq!(config.default_interpolation, InterpolationMode::Linear);
        assert_eq!(config.spline_mode, SplineMode::Linear);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = EngineConfig {
            default_easing: Easing::EaseInOutSine,
            default_interpolation: InterpolationMode::Hold,
            spline_mode: SplineMode::CatmullRom,
            ..EngineConfig::default()
        };
        let ron_str = config.to_ron().unwrap();
        assert!(ron_str.contains("ease-in-out-sine"));
        let loaded = EngineConfig::from_ron(&ron_str).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = EngineConfig::from_ron("(spline_mode: CatmullRom)").unwrap();
        assert_eq!(config.spline_mode, SplineMode::CatmullRom);
        assert_eq!(config.default_easing, Easing::Linear);
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let err = EngineConfig::from_ron("(version: 99)").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn test_unknown_easing_is_rejected() {
        assert!(EngineConfig::from_ron("(default_easing: \"wobble\")").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "timeline_keyframes_config_{}.ron",
            uuid::Uuid::new_v4()
        ));
        let config = EngineConfig {
            default_easing: Easing::EaseOutBounce,
            ..EngineConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = EngineConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
